mod common;

use std::collections::{BTreeSet, HashMap};

use catanatron_graph::{
    BoardGraph, BuildingKind, Buildings, Color, Edge, EnemyBuildings, LongestRoad,
    LongestRoadConfig, RoadMap, RoadNetwork, longest_acyclic_path, longest_acyclic_path_with,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use common::{assert_valid_road, brick_wall, random_ownership, reference_length};

fn owned_by(color: Color, edges: &[Edge]) -> RoadMap {
    RoadMap::from_entries(edges.iter().map(|&edge| (edge, color))).unwrap()
}

#[test]
fn test_brick_wall_matches_base_board_size() {
    let graph = brick_wall(6, 9);
    assert_eq!(graph.node_count(), 54);
    assert_eq!(graph.edge_count(), 71);
    assert!(graph.nodes().iter().all(|&node| graph.neighbors(node).len() <= 3));
}

#[test]
fn test_square_loop_scenario() {
    let (a, b, c, d) = (10, 11, 12, 13);
    let edges = [(a, b), (b, c), (c, d), (d, a)];
    let graph = BoardGraph::from_parts([a, b, c, d], edges);
    let roads = owned_by(Color::Red, &edges);
    let buildings: Buildings = HashMap::new();

    let path = longest_acyclic_path(&buildings, &roads, [a], Color::Red, &graph);
    assert_eq!(path.len(), 4);
    assert_valid_road(&path, &roads, Color::Red);
}

#[test]
fn test_line_with_rival_settlement_scenario() {
    let (a, b, c, d) = (0, 1, 2, 3);
    let edges = [(a, b), (b, c), (c, d)];
    let graph = BoardGraph::from_parts([a, b, c, d], edges);
    let roads = owned_by(Color::Red, &edges);
    let buildings: Buildings = HashMap::from([(c, (Color::Blue, BuildingKind::Settlement))]);

    let terminal = longest_acyclic_path_with(
        &buildings,
        &roads,
        [a],
        Color::Red,
        &graph,
        EnemyBuildings::Terminal,
    );
    let edges: BTreeSet<Edge> = terminal.edges().iter().copied().collect();
    assert_eq!(edges, BTreeSet::from([(a, b), (b, c)]));

    let impassable = longest_acyclic_path(&buildings, &roads, [a], Color::Red, &graph);
    assert_eq!(impassable.edges(), &[(a, b)]);

    // From every node touching a red road both rules agree on length 2.
    let starts = roads.nodes_touching(Color::Red);
    let impassable = longest_acyclic_path(&buildings, &roads, starts, Color::Red, &graph);
    assert_eq!(impassable.len(), 2);
}

#[test]
fn test_no_roads_of_color_scenario() {
    let graph = brick_wall(3, 4);
    let roads = owned_by(Color::Blue, &graph.edges());
    let buildings: Buildings = HashMap::new();

    let path = longest_acyclic_path(&buildings, &roads, graph.nodes(), Color::White, &graph);
    assert!(path.is_empty());
}

#[test]
fn test_matches_reference_search_on_random_boards() {
    let graph = brick_wall(6, 9);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..25 {
        let (roads, buildings) = random_ownership(&graph, &mut rng, 12);
        for color in Color::ORDERED {
            let starts = roads.nodes_touching(color);
            let path = longest_acyclic_path(&buildings, &roads, starts.clone(), color, &graph);
            assert_valid_road(&path, &roads, color);
            assert_eq!(
                path.len(),
                reference_length(&graph, &roads, &buildings, color, starts)
            );
        }
    }
}

#[test]
fn test_length_does_not_depend_on_start_order() {
    let graph = brick_wall(6, 9);
    let mut rng = StdRng::seed_from_u64(11);
    let (roads, buildings) = random_ownership(&graph, &mut rng, 15);

    for color in Color::ORDERED {
        let mut starts: Vec<_> = roads.nodes_touching(color).into_iter().collect();
        let expected =
            longest_acyclic_path(&buildings, &roads, starts.clone(), color, &graph).len();
        for _ in 0..5 {
            starts.shuffle(&mut rng);
            let path = longest_acyclic_path(&buildings, &roads, starts.clone(), color, &graph);
            assert_eq!(path.len(), expected);
        }
    }
}

#[test]
fn test_components_agree_with_whole_board_search() {
    let graph = brick_wall(6, 9);
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..10 {
        let (roads, buildings) = random_ownership(&graph, &mut rng, 12);
        let network = RoadNetwork::new(&graph, &buildings, &roads);
        for color in Color::ORDERED {
            let whole = longest_acyclic_path(
                &buildings,
                &roads,
                roads.nodes_touching(color),
                color,
                &graph,
            );
            assert_eq!(network.longest_road_length(color), whole.len());
        }
    }
}

#[test]
fn test_searching_a_subgraph_of_one_component() {
    let graph = brick_wall(6, 9);
    let mut rng = StdRng::seed_from_u64(5);
    let (roads, _) = random_ownership(&graph, &mut rng, 10);
    // Without buildings every component is closed under orange roads.
    let buildings: Buildings = HashMap::new();
    let network = RoadNetwork::new(&graph, &buildings, &roads);

    for component in network.components(Color::Orange) {
        let sub = graph.subgraph(component.iter().copied());
        assert_eq!(sub.nodes(), component.iter().copied().collect::<Vec<_>>());
        assert!(sub
            .edges()
            .iter()
            .all(|(a, b)| component.contains(a) && component.contains(b)));

        let on_sub = longest_acyclic_path(&buildings, &roads, sub.nodes(), Color::Orange, &sub);
        let on_board =
            longest_acyclic_path(&buildings, &roads, component, Color::Orange, &graph);
        assert_eq!(on_sub.len(), on_board.len());
    }
}

#[test]
fn test_parallel_searches_share_one_board() {
    let graph = brick_wall(6, 9);
    let mut rng = StdRng::seed_from_u64(99);
    let (roads, buildings) = random_ownership(&graph, &mut rng, 15);

    let sequential: Vec<usize> = Color::ORDERED
        .iter()
        .map(|&color| {
            longest_acyclic_path(&buildings, &roads, roads.nodes_touching(color), color, &graph)
                .len()
        })
        .collect();

    let parallel: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = Color::ORDERED
            .iter()
            .map(|&color| {
                let (graph, roads, buildings) = (&graph, &roads, &buildings);
                scope.spawn(move || {
                    let starts = roads.nodes_touching(color);
                    longest_acyclic_path(buildings, roads, starts, color, graph).len()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_award_follows_a_growing_road() {
    let graph = brick_wall(6, 9);
    let row: Vec<Edge> = (0..8).map(|c| (c, c + 1)).collect();
    let buildings: Buildings = HashMap::new();
    let config = LongestRoadConfig::default();
    let mut award = LongestRoad::new();

    let mut holders = Vec::new();
    for built in 1..=row.len() {
        let mut entries: Vec<(Edge, Color)> =
            row[..built].iter().map(|&edge| (edge, Color::Blue)).collect();
        // A fixed five-road White line on the bottom row.
        entries.extend((45..50).map(|c| ((c, c + 1), Color::White)));
        let roads = RoadMap::from_entries(entries).unwrap();

        let network = RoadNetwork::new(&graph, &buildings, &roads);
        award.update(network.road_lengths(Color::ORDERED), &config);
        holders.push(award.holder());
    }

    // White takes it at once; Blue needs six roads to beat five.
    assert_eq!(holders[0], Some(Color::White));
    assert_eq!(holders[4], Some(Color::White));
    assert_eq!(holders[5], Some(Color::Blue));
    assert_eq!(award.length(), 8);
}
