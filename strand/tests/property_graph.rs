use proptest::prelude::*;
use std::collections::HashSet;
use strand::model::{ImageInfo, PathConfig};
use strand::Path;

#[derive(Clone, Debug)]
enum Op {
    AddPoint { x: i16, y: i16 },
    MovePoint { idx: u16, dx: i8, dy: i8 },
    DeletePoint { idx: u16 },
    ConvertPoint { idx: u16 },
    MoveHandle { idx: u16, which: u8, dx: i8, dy: i8 },
    InsertOnSegment { idx: u16 },
    Close,
    Break { idx: u16 },
    Finalize,
    ToggleSelect { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddPoint { x, y }),
        (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::MovePoint { idx, dx, dy }),
        any::<u16>().prop_map(|idx| Op::DeletePoint { idx }),
        any::<u16>().prop_map(|idx| Op::ConvertPoint { idx }),
        (any::<u16>(), (1u8..=2u8), any::<i8>(), any::<i8>())
            .prop_map(|(idx, which, dx, dy)| Op::MoveHandle { idx, which, dx, dy }),
        any::<u16>().prop_map(|idx| Op::InsertOnSegment { idx }),
        Just(Op::Close),
        any::<u16>().prop_map(|idx| Op::Break { idx }),
        Just(Op::Finalize),
        any::<u16>().prop_map(|idx| Op::ToggleSelect { idx }),
    ]
}

fn pick_id(p: &Path, idx: u16) -> Option<u32> {
    let pts = p.points();
    if pts.is_empty() {
        return None;
    }
    Some(pts[(idx as usize) % pts.len()].id)
}

fn apply_op(p: &mut Path, op: Op) {
    match op {
        Op::AddPoint { x, y } => {
            let _ = p.add_point((x as f32 * 0.001).abs().min(100.0), (y as f32 * 0.001).abs().min(100.0));
        }
        Op::MovePoint { idx, dx, dy } => {
            if let Some(id) = pick_id(p, idx) {
                if let Some(pt) = p.get_point(id) {
                    p.move_point(id, pt.x + dx as f32 * 0.05, pt.y + dy as f32 * 0.05);
                }
            }
        }
        Op::DeletePoint { idx } => {
            if let Some(id) = pick_id(p, idx) {
                p.delete_point(id);
            }
        }
        Op::ConvertPoint { idx } => {
            if let Some(id) = pick_id(p, idx) {
                p.convert_point(id);
            }
        }
        Op::MoveHandle { idx, which, dx, dy } => {
            if let Some(id) = pick_id(p, idx) {
                if let Some(pt) = p.get_point(id) {
                    p.move_handle(id, which, pt.x + dx as f32 * 0.1, pt.y + dy as f32 * 0.1);
                }
            }
        }
        Op::InsertOnSegment { idx } => {
            let segments: Vec<(u32, u32)> = p
                .points()
                .iter()
                .filter_map(|q| q.prev.map(|prev| (prev, q.id)))
                .collect();
            if segments.is_empty() {
                return;
            }
            let (a, b) = segments[(idx as usize) % segments.len()];
            let (pa, pb) = (p.get_point(a).unwrap(), p.get_point(b).unwrap());
            let _ = p.insert_on_segment(a, b, (pa.x + pb.x) * 0.5, (pa.y + pb.y) * 0.5);
        }
        Op::Close => {
            let _ = p.close_path();
        }
        Op::Break { idx } => {
            if let Some(id) = pick_id(p, idx) {
                let _ = p.break_at(id);
            }
        }
        Op::Finalize => {
            let _ = p.finalize();
        }
        Op::ToggleSelect { idx } => {
            if let Some(id) = pick_id(p, idx) {
                p.toggle_select(id);
            }
        }
    }
}

fn check_invariants(p: &Path) {
    let pts = p.points();
    // Unique ids, resolvable prev references.
    let ids: HashSet<u32> = pts.iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), pts.len(), "duplicate ids");
    for q in pts {
        if let Some(prev) = q.prev {
            assert!(ids.contains(&prev), "dangling prev {} on {}", prev, q.id);
            assert_ne!(prev, q.id, "self reference on {}", q.id);
        }
    }
    if pts.is_empty() {
        return;
    }
    // Exactly one root, and traversal reaches every point (no cycles,
    // no disconnected islands).
    let roots = pts.iter().filter(|q| q.prev.is_none()).count();
    assert_eq!(roots, 1, "expected one root, got {}", roots);
    assert_eq!(p.chain_order().len(), pts.len(), "traversal missed points");
    // Non-skeleton paths stay strict chains.
    for q in pts {
        assert!(!p.is_branching(q.id), "branch in non-skeleton path at {}", q.id);
    }
    // A closed path keeps its structural minimum.
    if p.closed() {
        assert!(pts.len() >= 3, "closed with {} points", pts.len());
    }
    // Index agrees with storage.
    for q in pts {
        assert_eq!(p.get_point(q.id).map(|r| r.id), Some(q.id));
    }
    // Export of any reachable state imports cleanly and round-trips.
    let exported = p.to_result();
    let imported = Path::from_result(&exported, p.config().clone()).expect("reimport");
    assert_eq!(imported.to_result(), exported);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_edit_sequences_preserve_graph_invariants(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut p = Path::new(PathConfig::default(), ImageInfo::default());
        for op in ops {
            apply_op(&mut p, op);
            check_invariants(&p);
        }
    }

    #[test]
    fn random_skeleton_edits_keep_a_single_tree(
        ops in prop::collection::vec(op_strategy(), 0..60),
        branch_picks in prop::collection::vec(any::<u16>(), 0..20),
    ) {
        let mut config = PathConfig::default();
        config.skeleton = true;
        let mut p = Path::new(config, ImageInfo::default());
        let mut picks = branch_picks.into_iter();
        for op in ops {
            if let Op::AddPoint { .. } = op {
                if let Some(idx) = picks.next() {
                    if let Some(id) = pick_id(&p, idx) {
                        p.set_branch_active(id);
                    }
                }
            }
            apply_op(&mut p, op);
            let pts = p.points();
            if pts.is_empty() { continue; }
            let roots = pts.iter().filter(|q| q.prev.is_none()).count();
            prop_assert_eq!(roots, 1);
            prop_assert_eq!(p.chain_order().len(), pts.len());
        }
    }
}
