use pathwise::{
    AdjacencyGraph, BellmanFord, CriticalDistanceRelaxer, DagShortestPath, Dijkstra,
    FloydWarshall, PredecessorRecorder, WeightedEdge,
};

fn dijkstra_example() {
    let graph: AdjacencyGraph<&str> = AdjacencyGraph::from_edges([
        ("a", "b", 30.0),
        ("a", "c", 30.0),
        ("b", "e", 60.0),
        ("c", "d", 40.0),
        ("d", "e", 4.0),
    ])
    .expect("valid edge list");

    let mut dijkstra = Dijkstra::new(&graph, |e: &WeightedEdge<&str>| e.weight);
    let recorder = PredecessorRecorder::new();
    let _attachment = recorder.attach(&dijkstra.events);

    dijkstra.compute_from("a").expect("non-negative weights");

    println!("Dijkstra distances from a:");
    for (vertex, distance) in dijkstra.get_distances() {
        println!("  {vertex}: {distance}");
    }

    if let Some(path) = recorder.path_to(&"e") {
        println!("Lightest path from a to e:");
        for edge in path {
            println!("  {edge:?}");
        }
    } else {
        println!("No path from a to e found.");
    }
}

fn bellman_ford_example() {
    let graph: AdjacencyGraph<&str> = AdjacencyGraph::from_edges([
        ("s", "u", 4.0),
        ("s", "v", 8.0),
        ("u", "v", -3.0),
        ("v", "t", 2.0),
        ("u", "t", 7.0),
    ])
    .expect("valid edge list");

    let mut bellman_ford = BellmanFord::new(&graph, |e: &WeightedEdge<&str>| e.weight);
    bellman_ford.compute_from("s").expect("computes");

    println!("Bellman-Ford distances from s (negative weights allowed):");
    for (vertex, distance) in bellman_ford.get_distances() {
        println!("  {vertex}: {distance}");
    }
    println!("negative cycle: {}", bellman_ford.found_negative_cycle());
}

fn critical_path_example() {
    // task graph: edge weight = duration of the source task
    let graph: AdjacencyGraph<&str> = AdjacencyGraph::from_edges([
        ("start", "dig", 0.0),
        ("dig", "pour", 3.0),
        ("dig", "frame", 3.0),
        ("pour", "roof", 2.0),
        ("frame", "roof", 5.0),
        ("roof", "done", 4.0),
    ])
    .expect("valid edge list");

    let mut critical = DagShortestPath::with_relaxer(
        &graph,
        |e: &WeightedEdge<&str>| e.weight,
        CriticalDistanceRelaxer,
    );
    critical.compute_from("start").expect("graph is acyclic");

    println!("Critical-path completion times:");
    for (vertex, distance) in critical.get_distances() {
        println!("  {vertex}: {distance}");
    }
}

fn floyd_warshall_example() {
    let graph: AdjacencyGraph<&str> = AdjacencyGraph::from_edges([
        ("a", "c", 1.0),
        ("b", "b", 2.0),
        ("b", "d", 1.0),
        ("b", "e", 2.0),
        ("c", "b", 7.0),
        ("c", "d", 3.0),
        ("d", "e", 1.0),
        ("e", "a", 1.0),
        ("e", "b", 1.0),
    ])
    .expect("valid edge list");

    let mut all_pairs = FloydWarshall::new(&graph, |e: &WeightedEdge<&str>| e.weight);
    all_pairs.compute().expect("no negative cycle");

    println!("All-pairs distances:");
    for (source, target, distance) in all_pairs.get_distances() {
        println!("  {source} -> {target}: {distance}");
    }

    if let Some(path) = all_pairs.try_get_path(&"a", &"e") {
        println!("Path a -> e:");
        for edge in path {
            println!("  {edge:?}");
        }
    }
}

fn main() {
    dijkstra_example();
    println!();
    bellman_ford_example();
    println!();
    critical_path_example();
    println!();
    floyd_warshall_example();
}
