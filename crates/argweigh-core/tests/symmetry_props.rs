//! Property tests: the attack relation stays symmetric under any sequence of
//! create/update/remove operations, including dangling references and
//! self-attacks.

use proptest::prelude::*;

use argweigh_core::{ArgumentGraph, CategoryConfig, NodeSpec};

const IDS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

#[derive(Debug, Clone)]
enum Op {
    Create {
        id: usize,
        attacks: Vec<usize>,
        attacked_by: Vec<usize>,
    },
    Update {
        id: usize,
        attacks: Vec<usize>,
        attacked_by: Vec<usize>,
    },
    Remove {
        id: usize,
    },
}

fn relation() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..IDS.len(), 0..4)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDS.len(), relation(), relation()).prop_map(|(id, attacks, attacked_by)| {
            Op::Create {
                id,
                attacks,
                attacked_by,
            }
        }),
        (0..IDS.len(), relation(), relation()).prop_map(|(id, attacks, attacked_by)| {
            Op::Update {
                id,
                attacks,
                attacked_by,
            }
        }),
        (0..IDS.len()).prop_map(|id| Op::Remove { id }),
    ]
}

fn spec(id: usize, attacks: &[usize], attacked_by: &[usize]) -> NodeSpec {
    let names = |idx: &[usize]| idx.iter().map(|&i| IDS[i]).collect::<Vec<_>>();
    NodeSpec::new(IDS[id], "argument", "eco")
        .attacking(&names(attacks))
        .attacked_by(&names(attacked_by))
}

fn categories() -> CategoryConfig {
    CategoryConfig::new().with("eco", "Economic", "#e0b050")
}

fn assert_symmetric(graph: &ArgumentGraph) {
    for a in graph.nodes() {
        for b in graph.nodes() {
            assert_eq!(
                a.attacks.contains(&b.id),
                b.attacked_by.contains(&a.id),
                "asymmetric pair ({}, {})",
                a.id,
                b.id
            );
        }
    }
}

proptest! {
    #[test]
    fn relation_stays_symmetric(ops in prop::collection::vec(op(), 1..30)) {
        let mut graph = ArgumentGraph::new(categories());
        for op in ops {
            // Errors (duplicate ids, unknown ids) are expected and must leave
            // the graph consistent too.
            let _ = match op {
                Op::Create { id, attacks, attacked_by } => {
                    graph.create(spec(id, &attacks, &attacked_by))
                }
                Op::Update { id, attacks, attacked_by } => {
                    graph.update(IDS[id], spec(id, &attacks, &attacked_by))
                }
                Op::Remove { id } => graph.remove(IDS[id]).map(|_| ()),
            };
            assert_symmetric(&graph);
            prop_assert!(graph.verify_symmetry().is_ok());
        }
    }

    #[test]
    fn noop_update_is_idempotent(ops in prop::collection::vec(op(), 1..20)) {
        let mut graph = ArgumentGraph::new(categories());
        for op in ops {
            let _ = match op {
                Op::Create { id, attacks, attacked_by } => {
                    graph.create(spec(id, &attacks, &attacked_by))
                }
                Op::Update { id, attacks, attacked_by } => {
                    graph.update(IDS[id], spec(id, &attacks, &attacked_by))
                }
                Op::Remove { id } => graph.remove(IDS[id]).map(|_| ()),
            };
        }

        let before = graph.snapshot();
        let ids: Vec<String> = graph.nodes().map(|n| n.id.to_string()).collect();
        for id in &ids {
            let current = graph.get(id).unwrap().to_spec();
            graph.update(id, current).unwrap();
        }
        prop_assert_eq!(graph.snapshot(), before);
    }

    #[test]
    fn load_matches_incremental_creation(
        rels in prop::collection::vec((relation(), relation()), IDS.len())
    ) {
        let specs: Vec<NodeSpec> = rels
            .iter()
            .enumerate()
            .map(|(i, (attacks, attacked_by))| spec(i, attacks, attacked_by))
            .collect();

        let loaded = ArgumentGraph::load(categories(), specs.clone()).unwrap();

        let mut built = ArgumentGraph::new(categories());
        for s in specs {
            built.create(s).unwrap();
        }

        prop_assert_eq!(loaded.edges(), built.edges());
    }
}
