use vaquita::render::{Pipeline, PipelineError, Point, Rect};

const ORIGINAL: &str = "\
TOP NODE
1

GAPS
1 1

NODES
1 6 2
2 6 2
3 6 2

EDGES
1 2 CENTER 0 0 CENTER 0 0 CENTER 0 0
2 3 CW 4 2 CENTER 3 1 CCW 4 2
";

const TREE: &str = "\
CUT_VERTICES
BLOCK_BEGIN
1
BLOCK_CUT_VERTICES
BLOCK_ORDINARY_VERTICES
1
2
3
BLOCK_EDGES
1 2
2 3
BLOCK_END
";

const PLANARIZED: &str = "\
NODES
1
2
3
VIRTUAL_NODES
4
EDGES
1 2
3 4 2
";

const EMBEDDING: &str = "\
INCIDENCES
1 2
2 1 4
4 2 3
3 4
FACES
0 1 2 4 3
1 3 4 2 1
";

const VIS_REP: &str = "\
AREA
40 30

NODES
1 0 10 20
2 0 10 10
3 12 20 10
4 4 8 20
EDGES
1 2 2 20 10 NOTFLIPPED
2 4 6 10 20 NOTFLIPPED
4 3 7 20 10 FLIPPED
";

#[test]
fn emits_decomposition_input_from_the_original_graph() {
    let pipeline = Pipeline::new(ORIGINAL).unwrap();
    assert_eq!(
        pipeline.decomposition_input(),
        "NODES\n1\n2\n3\n\nEDGES\n1 2\n2 3\n\n"
    );
}

#[test]
fn pins_virtual_node_numbering_above_the_original_maximum() {
    let mut pipeline = Pipeline::new(ORIGINAL).unwrap();
    pipeline.ingest_decomposition(TREE).unwrap();
    assert_eq!(pipeline.block_keys(), vec![1]);
    assert_eq!(
        pipeline.planarization_input(1).unwrap(),
        "NODES\n1\n2\n3\n\nVIRTUAL NODE START\n4\nEDGES\n1 2\n2 3\n\n"
    );
}

#[test]
fn full_pass_assembles_solver_input_and_drawing() {
    let mut pipeline = Pipeline::new(ORIGINAL).unwrap();
    pipeline.ingest_decomposition(TREE).unwrap();
    pipeline.ingest_planarized(1, PLANARIZED).unwrap();
    assert_eq!(
        pipeline.embedding_input(1).unwrap(),
        "NODES\n1\n2\n3\n4\n\nEDGES\n1 2\n2 4\n4 3\n"
    );
    pipeline.ingest_embedding(1, EMBEDDING).unwrap();

    assert_eq!(
        pipeline.vis_rep_input().unwrap(),
        "GAPS\n\
         1 1\n\
         \n\
         NODES\n\
         1 6 2\n\
         2 6 2\n\
         3 6 2\n\
         4 2 2\n\
         EDGES\n\
         1 2 CENTER 0 0 CENTER 0 0 CENTER 0 0\n\
         2 4 CW 4 2 CENTER 3 1 CENTER 0 0\n\
         4 3 CENTER 0 0 CENTER 0 0 CCW 4 2\n\
         INCIDENCES\n\
         1 2\n\
         2 1 4\n\
         4 2 3\n\
         3 4\n\
         BLOCKS\n\
         1 1 2 3\n\
         FACES\n\
         1 1 2 4 3\n\
         2 3 4 2 1\n\
         UNIFICATION GROUPS\n\
         ROOT\n\
         1 1 1\n"
    );

    let drawing = pipeline.drawing(VIS_REP).unwrap();
    assert_eq!(drawing.width, 40.0);
    assert_eq!(drawing.height, 30.0);

    let nums: Vec<i64> = drawing.nodes.iter().map(|n| n.num).collect();
    assert_eq!(nums, vec![1, 2, 3, 4]);
    let mids: Vec<f64> = drawing.nodes.iter().map(|n| n.x_mid).collect();
    assert_eq!(mids, vec![3.0, 4.0, 15.0, 6.5]);
    assert!(drawing.nodes[3].is_virtual);
    assert_eq!(drawing.nodes[3].width, 2.0);
    assert_eq!(drawing.nodes[3].height, 2.0);

    let keys: Vec<(i64, i64)> = drawing.edges.iter().map(|e| (e.n1, e.n2)).collect();
    assert_eq!(keys, vec![(1, 2), (2, 4), (4, 3)]);

    // The original 1 -> 2 survives planarization whole and carries no labels.
    let plain = &drawing.edges[0];
    assert_eq!(plain.label1, None);
    assert_eq!(plain.label_mid, None);
    assert_eq!(plain.label2, None);
    assert_eq!(
        plain.line,
        vec![
            Point { x: 3.0, y: 20.0 },
            Point { x: 2.0, y: 19.0 },
            Point { x: 2.0, y: 11.0 },
            Point { x: 4.0, y: 10.0 },
        ]
    );

    // 2 -> 3 was split at virtual node 4: the lower segment keeps the
    // near-2 and middle labels, the upper one the near-3 label.
    let lower = &drawing.edges[1];
    assert_eq!(
        lower.label1,
        Some(Rect {
            x: 6.0,
            y: 11.0,
            width: 4.0,
            height: 2.0
        })
    );
    assert_eq!(
        lower.label_mid,
        Some(Rect {
            x: 4.5,
            y: 15.5,
            width: 3.0,
            height: 1.0
        })
    );
    assert_eq!(lower.label2, None);
    assert_eq!(
        lower.line,
        vec![
            Point { x: 4.0, y: 10.0 },
            Point { x: 6.0, y: 11.0 },
            Point { x: 6.0, y: 19.0 },
            Point { x: 6.5, y: 20.0 },
        ]
    );

    let upper = &drawing.edges[2];
    assert_eq!(upper.label1, None);
    assert_eq!(upper.label_mid, None);
    // Flipped attachment pushes the CCW label to the left of the line.
    assert_eq!(
        upper.label2,
        Some(Rect {
            x: 3.0,
            y: 11.0,
            width: 4.0,
            height: 2.0
        })
    );
}

#[test]
fn threads_node_and_face_counters_across_blocks() {
    const SHARED_ORIGINAL: &str = "\
TOP NODE
1

GAPS
10 5

NODES
1 40 20
2 40 20
3 40 20

EDGES
1 2 CENTER 8 4 CENTER 6 2 CENTER 8 4
2 3 CW 8 4 CENTER 6 2 CCW 8 4
";
    const SHARED_TREE: &str = "\
CUT_VERTICES
1 2 1 2
BLOCK_BEGIN
1
BLOCK_CUT_VERTICES
2 1
BLOCK_ORDINARY_VERTICES
1
BLOCK_EDGES
1 2
BLOCK_END
BLOCK_BEGIN
2
BLOCK_CUT_VERTICES
2 1
BLOCK_ORDINARY_VERTICES
3
BLOCK_EDGES
2 3
BLOCK_END
";

    let mut pipeline = Pipeline::new(SHARED_ORIGINAL).unwrap();
    pipeline.ingest_decomposition(SHARED_TREE).unwrap();
    assert_eq!(pipeline.block_keys(), vec![1, 2]);

    // Block 1 introduces no virtual nodes, so block 2 still starts at 4.
    assert_eq!(
        pipeline.planarization_input(1).unwrap(),
        "NODES\n2\n1\n\nVIRTUAL NODE START\n4\nEDGES\n1 2\n\n"
    );
    pipeline
        .ingest_planarized(1, "NODES\n1\n2\nEDGES\n1 2\n")
        .unwrap();
    pipeline
        .ingest_embedding(1, "INCIDENCES\n1 2\n2 1\nFACES\n0 1 2\n1 2 1\n")
        .unwrap();

    assert_eq!(
        pipeline.planarization_input(2).unwrap(),
        "NODES\n2\n3\n\nVIRTUAL NODE START\n4\nEDGES\n2 3\n\n"
    );
    pipeline
        .ingest_planarized(2, "NODES\n2\n3\nVIRTUAL_NODES\n4\nEDGES\n2 4 3\n")
        .unwrap();
    pipeline
        .ingest_embedding(2, "INCIDENCES\n2 4\n4 2 3\n3 4\nFACES\n0 2 4 3\n1 3 4 2\n")
        .unwrap();

    // Block 2's faces continue the numbering block 1 left off at.
    let text = pipeline.vis_rep_input().unwrap();
    assert!(text.contains("FACES\n1 1 2\n2 2 1\n3 2 4 3\n4 3 4 2\n"));
    assert!(text.contains("UNIFICATION GROUPS\n1 2 1 1 1 1 2 3 4 3\n"));
    assert!(text.ends_with("ROOT\n1 1 1\n"));
}

#[test]
fn unknown_block_keys_are_rejected() {
    let mut pipeline = Pipeline::new(ORIGINAL).unwrap();
    pipeline.ingest_decomposition(TREE).unwrap();

    let err = pipeline.planarization_input(9).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Stage(vaquita::Error::MissingBlock { block: 9 })
    ));
    let err = pipeline.embedding_input(1).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Stage(vaquita::Error::MissingBlock { block: 1 })
    ));
}
