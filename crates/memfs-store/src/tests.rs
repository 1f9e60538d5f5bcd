//! Model-based checks: random operation sequences against a plain map.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use crate::{FileEntry, FileStore, InMemoryFileStore, StoreError, MAX_FILE_SIZE};

#[derive(Clone, Debug)]
enum Op {
    Create(Vec<usize>),
    Write(usize, usize),
    Delete(Vec<usize>),
    Read(usize),
}

const POOL: usize = 5;

fn name(idx: usize) -> String {
    format!("f{idx}")
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0..POOL;
    let batch = proptest::collection::vec(0..POOL, 0..4);
    prop_oneof![
        batch.clone().prop_map(Op::Create),
        (idx.clone(), 0..MAX_FILE_SIZE + 8).prop_map(|(i, len)| Op::Write(i, len)),
        batch.prop_map(Op::Delete),
        idx.prop_map(Op::Read),
    ]
}

fn check_invariants(store: &InMemoryFileStore, model: &HashMap<String, Vec<u8>>) {
    let entries = store.list_files(true);
    let mut seen = HashSet::new();
    for entry in &entries {
        let FileEntry::Detailed {
            size,
            created_at,
            modified_at,
            name,
        } = entry
        else {
            panic!("detailed listing returned a short entry");
        };
        assert!(seen.insert(name.clone()), "duplicate live name {name}");
        assert!(*size <= MAX_FILE_SIZE);
        assert!(modified_at >= created_at);
        assert_eq!(Some(*size), model.get(name).map(Vec::len));
    }
    assert_eq!(seen.len(), model.len());
}

proptest! {
    #[test]
    fn store_matches_model(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let store = InMemoryFileStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();

        for op in ops {
            match op {
                Op::Create(batch) => {
                    let names: Vec<String> = batch.into_iter().map(name).collect();
                    let outcome = store.create_files(&names);
                    prop_assert_eq!(outcome.len(), names.len());
                    for item in outcome {
                        if model.contains_key(&item.name) {
                            prop_assert_eq!(
                                item.result,
                                Err(StoreError::AlreadyExists { name: item.name.clone() })
                            );
                        } else {
                            prop_assert!(item.result.is_ok());
                            model.insert(item.name, Vec::new());
                        }
                    }
                }
                Op::Write(i, len) => {
                    let n = name(i);
                    let content = vec![b'w'; len];
                    let result = store.write_file(&n, &content);
                    match model.get_mut(&n) {
                        None => prop_assert!(result.unwrap_err().is_not_found()),
                        Some(_) if len > MAX_FILE_SIZE => {
                            let is_too_large = matches!(result, Err(StoreError::TooLarge { .. }));
                            prop_assert!(is_too_large);
                        }
                        Some(current) => {
                            prop_assert!(result.is_ok());
                            *current = content;
                        }
                    }
                }
                Op::Delete(batch) => {
                    let names: Vec<String> = batch.into_iter().map(name).collect();
                    for item in store.delete_files(&names) {
                        let expected_ok = model.remove(&item.name).is_some();
                        prop_assert_eq!(item.is_ok(), expected_ok);
                    }
                }
                Op::Read(i) => {
                    let n = name(i);
                    match model.get(&n) {
                        Some(content) => prop_assert_eq!(&store.read_file(&n).unwrap(), content),
                        None => prop_assert!(store.read_file(&n).unwrap_err().is_not_found()),
                    }
                }
            }
            check_invariants(&store, &model);
        }
    }
}
