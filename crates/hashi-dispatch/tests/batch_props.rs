//! Property tests for batch isolation.

use std::sync::Arc;

use hashi_dispatch::{BatchEntry, Dispatcher};
use hashi_protocol::{CallEnvelope, Codec};
use hashi_registry::{MethodReference, MethodRegistry};
use hashi_types::{params, Method, MethodError, Value};
use proptest::prelude::*;

fn dispatcher() -> Dispatcher {
    let mut registry = MethodRegistry::new();
    registry
        .register(
            "double",
            MethodReference::Direct(Method::new(|p: &[Value]| {
                Ok(Value::Int(params::arg_i64(p, 0)? * 2))
            })),
            None,
        )
        .expect("double");
    registry
        .register(
            "fail",
            MethodReference::Direct(Method::new(|_: &[Value]| {
                Err(MethodError::application("no"))
            })),
            None,
        )
        .expect("fail");
    Dispatcher::new(Arc::new(registry), Codec::new())
}

fn entry() -> impl Strategy<Value = BatchEntry> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| Ok(CallEnvelope::new("double", vec![Value::Int(n)]))),
        Just(Ok(CallEnvelope::new("fail", vec![]))),
        Just(Ok(CallEnvelope::new("missing", vec![]))),
    ]
}

proptest! {
    /// Every slot of a batch equals its standalone dispatch.
    #[test]
    fn batch_slots_match_standalone(entries in proptest::collection::vec(entry(), 0..16)) {
        let d = dispatcher();
        let results = d.dispatch_batch(&entries);
        prop_assert_eq!(results.len(), entries.len());
        for (entry, result) in entries.iter().zip(&results) {
            let call = entry.as_ref().expect("test: strategy only makes calls");
            prop_assert_eq!(result, &d.dispatch(call));
        }
    }
}
