use crate::disk::{Disk, DiskCfg, PointId};
use crate::mobius::MobiusTransform;

use super::generator::EdgeGenerator;
use super::graph::Graph;
use super::grow::seed_points;
use super::stitcher::{complete_quad, EdgeStitcher};
use super::types::{Edge, EdgeArena, GraphError, IndexSource, OrientedEdge, Polygon};
use super::{
    Exposure, ExposureParameterTable, FrontierTiling, TilingAlgorithm, TilingError, TilingParams,
};

/// Park a point at the given reading: center the view there, bake, restore.
fn place(disk: &mut Disk, x: f64, y: f64) -> PointId {
    let mut disk = disk.saved();
    disk.translate(-x, -y);
    disk.add_point().expect("cursor is invertible")
}

fn params(sides: u32, adjacency: u32, layers: u32) -> TilingParams {
    TilingParams {
        sides,
        adjacency,
        layers,
    }
}

#[test]
fn edge_rejects_degenerate_endpoints() {
    let p = PointId(3);
    assert_eq!(
        Edge::new(p, p, 0, 0).unwrap_err(),
        GraphError::DuplicatePoint(p)
    );
}

#[test]
fn edge_orientation_and_common_points() {
    let (a, b, c) = (PointId(0), PointId(1), PointId(2));
    let ab = Edge::new(a, b, 0, 0).unwrap();
    let bc = Edge::new(b, c, 0, 1).unwrap();

    assert_eq!(ab.oriented_away_from(b).unwrap().p1, a);
    assert_eq!(
        ab.oriented_away_from(c).unwrap_err(),
        GraphError::UnknownPoint(c)
    );

    assert_eq!(ab.common_point(&bc), Some(b));
    assert!(ab.has_common_point(&bc));
    assert_eq!(ab.key(), ab.reversed().key());

    let rev = ab.reversed().with_activity(true, true, false);
    assert_eq!(rev.p0, b);
    assert!(!rev.is_p1_active);
}

#[test]
fn graph_tracks_frontier_and_rejects_duplicates() {
    let (a, b) = (PointId(0), PointId(1));
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(a, b, 0, 0).unwrap()).unwrap();

    assert!(graph.contains_edge(b, a));
    assert_eq!(
        graph.add_edge(Edge::new(b, a, 0, 1).unwrap()).unwrap_err(),
        GraphError::DuplicateEdge { p0: b, p1: a }
    );

    let frontier: Vec<_> = graph.frontier_points().collect();
    assert_eq!(frontier, vec![a, b]);

    graph.mark_visited(a).unwrap();
    assert!(graph.is_visited(a));
    assert_eq!(
        graph.mark_frontier(a).unwrap_err(),
        GraphError::DuplicatePoint(a)
    );
    assert_eq!(
        graph.mark_visited(a).unwrap_err(),
        GraphError::NotFrontier(a)
    );
    assert_eq!(
        graph.mark_frontier(PointId(9)).unwrap_err(),
        GraphError::UnknownPoint(PointId(9))
    );
}

fn triangle_arena() -> (EdgeArena, [OrientedEdge; 3]) {
    let (a, b, c) = (PointId(0), PointId(1), PointId(2));
    let mut arena = EdgeArena::default();
    let ab = arena.push(Edge::new(a, b, 0, 0).unwrap());
    let bc = arena.push(Edge::new(b, c, 0, 1).unwrap());
    let ca = arena.push(Edge::new(c, a, 0, 2).unwrap());
    (
        arena,
        [
            OrientedEdge::forward(ab),
            OrientedEdge::forward(bc),
            OrientedEdge::forward(ca),
        ],
    )
}

#[test]
fn polygon_requires_contiguous_cycle() {
    let (arena, slots) = triangle_arena();

    let poly = Polygon::new(&arena, slots.to_vec(), 0, 0, Vec::new(), Vec::new()).unwrap();
    assert_eq!(
        poly.vertices(&arena).unwrap(),
        vec![PointId(0), PointId(1), PointId(2)]
    );

    let mut broken = slots.to_vec();
    broken[1].reversed = true;
    assert_eq!(
        Polygon::new(&arena, broken, 0, 0, Vec::new(), Vec::new()).unwrap_err(),
        GraphError::NonContiguousPolygon { at: 0 }
    );

    assert_eq!(
        Polygon::new(&arena, slots[..2].to_vec(), 0, 0, Vec::new(), Vec::new()).unwrap_err(),
        GraphError::PolygonTooSmall { edges: 2 }
    );
}

#[test]
fn polygon_rotation_helpers() {
    let (arena, slots) = triangle_arena();
    let poly = Polygon::new(&arena, slots.to_vec(), 0, 0, Vec::new(), Vec::new()).unwrap();

    let from_b = poly.slots_relative_to_vertex(&arena, PointId(1)).unwrap();
    let (start, _) = arena.endpoints(from_b[0]).unwrap();
    assert_eq!(start, PointId(1));
    assert_eq!(from_b.len(), 3);

    assert!(poly.contains_vertex(&arena, PointId(2)).unwrap());
    assert_eq!(
        poly.slots_relative_to_vertex(&arena, PointId(7)).unwrap_err(),
        GraphError::UnknownPoint(PointId(7))
    );
}

#[test]
fn exposure_table_rejects_non_hyperbolic_pairs() {
    assert!(matches!(
        ExposureParameterTable::new(4, 4),
        Err(TilingError::UnsupportedTiling { p: 4, q: 4 })
    ));
    assert!(matches!(
        ExposureParameterTable::new(3, 3),
        Err(TilingError::UnsupportedTiling { .. })
    ));
    assert!(ExposureParameterTable::new(4, 5).is_ok());
    assert!(ExposureParameterTable::new(3, 7).is_ok());
    assert!(ExposureParameterTable::new(7, 3).is_ok());
}

#[test]
fn exposure_table_general_case() {
    let table = ExposureParameterTable::new(4, 5).unwrap();

    assert_eq!(table.polygons_meeting(Exposure::Min), 1);
    assert_eq!(table.polygons_meeting(Exposure::Max), 4);

    assert_eq!(table.exposure(1, 0, 0), Exposure::Min);
    assert_eq!(table.exposure(1, 0, 2), Exposure::Max);

    assert_eq!(table.vertices_to_skip(Exposure::Min), 1);
    assert_eq!(table.vertices_to_skip(Exposure::Max), 0);
    assert_eq!(table.polygons_to_skip(Exposure::Max, 0), -1);
    assert_eq!(table.polygons_to_skip(Exposure::Max, 1), 0);
    assert_eq!(table.vertices_to_visit(Exposure::Min), 1);
    assert_eq!(table.vertices_to_visit(Exposure::Max), 2);

    // Per-polygon counts are only defined for the special cases.
    assert!(matches!(
        table.polygons_to_generate(Exposure::Min, 0),
        Err(TilingError::UnsupportedTiling { p: 4, q: 5 })
    ));
}

#[test]
fn exposure_table_triangle_case() {
    let table = ExposureParameterTable::new(3, 7).unwrap();

    assert_eq!(table.exposure(0, 0, 0), Exposure::Min);
    assert_eq!(table.exposure(0, 0, 1), Exposure::Max);
    assert_eq!(table.vertices_to_skip(Exposure::Max), 1);
    assert_eq!(table.polygons_to_skip(Exposure::Min, 3), -1);
    assert_eq!(table.vertices_to_visit(Exposure::Max), 1);
    assert_eq!(table.polygons_to_generate(Exposure::Min, 0).unwrap(), 3);
    assert_eq!(table.polygons_to_generate(Exposure::Max, 0).unwrap(), 4);
}

#[test]
fn exposure_table_triangular_vertex_case() {
    let table = ExposureParameterTable::new(7, 3).unwrap();

    assert_eq!(table.exposure(0, 0, 0), Exposure::Max);
    assert_eq!(table.exposure(1, 0, 0), Exposure::Min);
    assert_eq!(table.exposure(1, 2, 0), Exposure::Max);
    assert_eq!(table.vertices_to_skip(Exposure::Min), 3);
    assert_eq!(table.vertices_to_skip(Exposure::Max), 2);
    assert_eq!(table.polygons_to_skip(Exposure::Min, 0), 0);
    assert_eq!(table.vertices_to_visit(Exposure::Min), 2);
    assert_eq!(table.vertices_to_visit(Exposure::Max), 3);
    assert_eq!(table.polygons_to_generate(Exposure::Max, 0).unwrap(), 1);
}

/// Seed {p, q} vertices plus the cycle of seed edges.
fn seed_graph(disk: &mut Disk, p: &TilingParams) -> (Vec<PointId>, Graph) {
    let points = seed_points(disk, p).unwrap();
    let mut graph = Graph::new();
    for i in 0..points.len() {
        let edge = Edge::new(points[i], points[(i + 1) % points.len()], 0, i).unwrap();
        graph.add_edge(edge).unwrap();
    }
    (points, graph)
}

#[test]
fn generator_fans_three_edges_from_a_corner() {
    let mut disk = Disk::new();
    let p = params(4, 5, 1);
    let (points, mut graph) = seed_graph(&mut disk, &p);

    let generator = EdgeGenerator::new(DiskCfg::default());
    let mut indices = IndexSource::default();
    let created = generator
        .generate_new_edges(&mut disk, &mut graph, points[0], p.adjacency, 1, &mut indices)
        .unwrap();

    assert_eq!(created.len(), 3);
    assert_eq!(disk.point_count(), 7);
    assert_eq!(graph.edge_count(), 7);
    for id in &created {
        let edge = graph.edge(*id).unwrap();
        assert_eq!(edge.p0, points[0]);
        assert_eq!(edge.layer, 1);
    }
    // The guard restored the view.
    assert_eq!(disk.transform(), MobiusTransform::identity());
}

#[test]
fn generator_pairs_two_edges_from_a_seam() {
    let mut disk = Disk::new();
    let p = place(&mut disk, 0.05, 0.0);
    let n0 = place(&mut disk, 0.3, 0.0);
    let n1 = place(&mut disk, 0.0, 0.3);
    let n2 = place(&mut disk, -0.3, -0.2);

    let mut graph = Graph::new();
    for (i, n) in [n0, n1, n2].into_iter().enumerate() {
        graph.add_edge(Edge::new(p, n, 0, i).unwrap()).unwrap();
    }

    let generator = EdgeGenerator::new(DiskCfg::default());
    let mut indices = IndexSource::default();
    let created = generator
        .generate_new_edges(&mut disk, &mut graph, p, 5, 1, &mut indices)
        .unwrap();

    assert_eq!(created.len(), 2);
    assert_eq!(disk.point_count(), 6);
    for id in &created {
        assert_eq!(graph.edge(*id).unwrap().p0, p);
    }
    assert_eq!(disk.transform(), MobiusTransform::identity());
}

#[test]
fn generator_ignores_interior_points() {
    let mut disk = Disk::new();
    let a = place(&mut disk, 0.1, 0.0);
    let b = place(&mut disk, 0.3, 0.0);
    let mut graph = Graph::new();
    graph.add_edge(Edge::new(a, b, 0, 0).unwrap()).unwrap();

    let generator = EdgeGenerator::new(DiskCfg::default());
    let mut indices = IndexSource::default();
    let created = generator
        .generate_new_edges(&mut disk, &mut graph, a, 5, 1, &mut indices)
        .unwrap();
    assert!(created.is_empty());
}

#[test]
fn complete_quad_rejects_other_sizes() {
    let mut disk = Disk::new();
    let f = place(&mut disk, 0.0, 0.0);
    let a = place(&mut disk, 0.3, 0.0);
    let b = place(&mut disk, 0.0, 0.3);
    let e0 = Edge::new(f, a, 1, 0).unwrap();
    let e1 = Edge::new(f, b, 1, 1).unwrap();

    assert!(matches!(
        complete_quad(&mut disk, DiskCfg::default(), 5, &e0, &e1),
        Err(TilingError::UnsupportedPolygonSize { sides: 5 })
    ));
}

#[test]
fn stitcher_closes_corner_quads() {
    let mut disk = Disk::new();
    let f = place(&mut disk, 0.0, 0.0);
    let a = place(&mut disk, 0.3, 0.0);
    let b = place(&mut disk, 0.0, 0.3);

    let mut graph = Graph::new();
    let e0 = graph.add_edge(Edge::new(f, a, 1, 0).unwrap()).unwrap();
    let e1 = graph.add_edge(Edge::new(f, b, 1, 1).unwrap()).unwrap();

    let stitcher = EdgeStitcher::new(DiskCfg::default());
    let mut edge_indices = IndexSource::default();
    let mut polygon_indices = IndexSource::default();
    let polygons = stitcher
        .stitch_new_edges(
            &mut disk,
            4,
            &mut graph,
            &[e0, e1],
            1,
            &mut edge_indices,
            &mut polygon_indices,
        )
        .unwrap();

    // Both cyclic pairings share f, so two quads close, each with its own
    // mirrored fourth point.
    assert_eq!(polygons.len(), 2);
    assert_eq!(disk.point_count(), 5);
    assert_eq!(graph.edge_count(), 6);

    let quad = &graph.polygons()[0];
    assert_eq!(quad.slots().len(), 4);
    assert!(quad.contains_vertex(graph.arena(), f).unwrap());
    assert!(quad.contains_vertex(graph.arena(), a).unwrap());
    assert!(quad.contains_vertex(graph.arena(), b).unwrap());

    // Polygon numbering comes from its own dispenser.
    assert_eq!(graph.polygons()[0].index_in_layer, 0);
    assert_eq!(graph.polygons()[1].index_in_layer, 1);
}

#[test]
fn stitcher_closes_square_quads_over_a_connecting_edge() {
    let mut disk = Disk::new();
    let x = place(&mut disk, -0.2, 0.0);
    let y = place(&mut disk, 0.2, 0.0);
    let a = place(&mut disk, -0.2, 0.3);
    let b = place(&mut disk, 0.2, 0.3);

    let mut graph = Graph::new();
    graph.add_edge(Edge::new(x, y, 0, 0).unwrap()).unwrap();
    let e0 = graph.add_edge(Edge::new(x, a, 1, 0).unwrap()).unwrap();
    let e1 = graph.add_edge(Edge::new(y, b, 1, 1).unwrap()).unwrap();

    let stitcher = EdgeStitcher::new(DiskCfg::default());
    let mut edge_indices = IndexSource::default();
    let mut polygon_indices = IndexSource::default();
    let polygons = stitcher
        .stitch_new_edges(
            &mut disk,
            4,
            &mut graph,
            &[e0, e1],
            1,
            &mut edge_indices,
            &mut polygon_indices,
        )
        .unwrap();

    // The first pairing closes the quad over (x, y) and adds the (a, b)
    // bridge; the reverse pairing then sees two connecting candidates and
    // is skipped.
    assert_eq!(polygons.len(), 1);
    assert_eq!(disk.point_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.contains_edge(a, b));

    let quad = &graph.polygons()[0];
    assert_eq!(
        quad.vertices(graph.arena()).unwrap(),
        vec![x, a, b, y]
    );
}

#[test]
fn stitcher_skips_unconnected_pairs() {
    let mut disk = Disk::new();
    let x = place(&mut disk, -0.2, 0.0);
    let y = place(&mut disk, 0.2, 0.0);
    let a = place(&mut disk, -0.2, 0.3);
    let b = place(&mut disk, 0.2, 0.3);

    let mut graph = Graph::new();
    let e0 = graph.add_edge(Edge::new(x, a, 1, 0).unwrap()).unwrap();
    let e1 = graph.add_edge(Edge::new(y, b, 1, 1).unwrap()).unwrap();

    let stitcher = EdgeStitcher::new(DiskCfg::default());
    let mut edge_indices = IndexSource::default();
    let mut polygon_indices = IndexSource::default();
    let polygons = stitcher
        .stitch_new_edges(
            &mut disk,
            4,
            &mut graph,
            &[e0, e1],
            1,
            &mut edge_indices,
            &mut polygon_indices,
        )
        .unwrap();
    assert!(polygons.is_empty());
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn params_validation() {
    assert!(params(4, 5, 1).validate().is_ok());
    assert!(params(3, 7, 1).validate().is_ok());
    assert!(matches!(
        params(4, 4, 1).validate(),
        Err(TilingError::UnsupportedTiling { p: 4, q: 4 })
    ));
    assert!(matches!(
        params(2, 9, 1).validate(),
        Err(TilingError::UnsupportedTiling { .. })
    ));
}

#[test]
fn frontier_seed_layer_matches_radius() {
    let p = params(4, 6, 0);
    let mut disk = Disk::new();
    let out = FrontierTiling::default().generate(&mut disk, &p).unwrap();

    assert_eq!(out.points.len(), 4);
    assert_eq!(out.edges.len(), 4);
    let radius = p.seed_radius();
    for point in &out.points {
        assert!((disk.position(*point).unwrap().norm() - radius).abs() < 1e-12);
    }
}

#[test]
fn frontier_first_layer_counts() {
    let p = params(4, 5, 1);
    let mut disk = Disk::new();
    let out = FrontierTiling::default().generate(&mut disk, &p).unwrap();

    // 4 seed points, 12 fanned points, 8 mirrored corner points;
    // 4 seed edges, 12 fanned, 16 corner bridges, 4 square bridges.
    assert_eq!(disk.point_count(), 24);
    assert_eq!(out.edges.len(), 36);
    assert_eq!(disk.edges().len(), 36);
}

#[test]
fn frontier_growth_is_deterministic() {
    let p = params(4, 5, 2);
    let run = || {
        let mut disk = Disk::new();
        let out = FrontierTiling::default().generate(&mut disk, &p).unwrap();
        let edges: Vec<(u32, u32)> = out.edges.iter().map(|(a, b)| (a.0, b.0)).collect();
        (disk.point_count(), edges)
    };

    let (points0, edges0) = run();
    let (points1, edges1) = run();
    assert!(points0 > 24);
    assert_eq!(points0, points1);
    assert_eq!(edges0, edges1);
}

#[test]
fn frontier_rejects_non_hyperbolic_params() {
    let mut disk = Disk::new();
    assert!(matches!(
        FrontierTiling::default().generate(&mut disk, &params(4, 4, 1)),
        Err(TilingError::UnsupportedTiling { p: 4, q: 4 })
    ));
}
