//! Property tests over random operation sequences.

use proptest::prelude::*;

use attest_registry::core::{Principal, RecordFields, RecordId, TxContext};
use attest_registry::store::Store;
use attest_registry::{ErrorCode, Registry, RegistryConfig};
use attest_registry_testkit::generators::{small_principal, valid_fields, FieldsParams};

#[derive(Debug, Clone)]
enum Op {
    Register(RecordFields),
    Update(u64, RecordFields),
    ExtendTags(u64, Vec<String>),
    Archive(u64),
    Reassign(u64, Principal),
    Terminate(u64),
    Authorize(u64, Principal),
    Revoke(u64, Principal),
    Sweep,
}

fn op() -> impl Strategy<Value = Op> {
    let id = 1u64..6;
    prop_oneof![
        3 => valid_fields().prop_map(Op::Register),
        1 => any::<FieldsParams>().prop_map(|p| Op::Register(p.fields)),
        1 => (id.clone(), valid_fields()).prop_map(|(id, f)| Op::Update(id, f)),
        2 => (id.clone(), prop::collection::vec("[a-z]{1,8}", 1..4)).prop_map(|(id, t)| Op::ExtendTags(id, t)),
        1 => id.clone().prop_map(Op::Archive),
        1 => (id.clone(), small_principal(4)).prop_map(|(id, p)| Op::Reassign(id, p)),
        1 => id.clone().prop_map(Op::Terminate),
        2 => (id.clone(), small_principal(4)).prop_map(|(id, p)| Op::Authorize(id, p)),
        2 => (id, small_principal(4)).prop_map(|(id, p)| Op::Revoke(id, p)),
        1 => Just(Op::Sweep),
    ]
}

fn apply(registry: &mut Registry, ctx: &TxContext, op: Op) -> attest_registry::Result<()> {
    match op {
        Op::Register(fields) => registry.register(ctx, fields).map(|_| ()),
        Op::Update(id, fields) => registry.update(ctx, RecordId::new(id), fields),
        Op::ExtendTags(id, tags) => registry.extend_tags(ctx, RecordId::new(id), &tags),
        Op::Archive(id) => registry.archive(ctx, RecordId::new(id)),
        Op::Reassign(id, p) => registry.reassign_controller(ctx, RecordId::new(id), p),
        Op::Terminate(id) => registry.terminate(ctx, RecordId::new(id)),
        Op::Authorize(id, p) => registry.authorize_viewer(ctx, RecordId::new(id), p).map(|_| ()),
        Op::Revoke(id, p) => registry.revoke_viewer(ctx, RecordId::new(id), &p).map(|_| ()),
        Op::Sweep => registry.sweep_orphaned_grants(ctx).map(|_| ()),
    }
}

fn admin() -> Principal {
    Principal::derive("party-0")
}

proptest! {
    // Every failure is all-or-nothing, and ids only ever move forward.
    #[test]
    fn test_failed_operations_change_nothing(
        steps in prop::collection::vec((small_principal(4), op()), 1..40)
    ) {
        let mut registry = Registry::new(RegistryConfig::new(admin()));
        let mut issued: Vec<RecordId> = Vec::new();

        for (height, (sender, op)) in steps.into_iter().enumerate() {
            let ctx = TxContext::new(sender, height as u64);
            let before = registry.state_digest();
            let counter = registry.store().last_record_id();
            let is_register = matches!(op, Op::Register(_));

            match apply(&mut registry, &ctx, op) {
                Ok(()) if is_register => {
                    let id = registry.store().last_record_id();
                    prop_assert!(id > counter);
                    prop_assert!(issued.iter().all(|prev| *prev < id));
                    issued.push(id);
                }
                Ok(()) => prop_assert_eq!(registry.store().last_record_id(), counter),
                Err(_) => prop_assert_eq!(registry.state_digest(), before),
            }
        }
    }

    // Controllers, the administrator and granted viewers can read; no one else.
    #[test]
    fn test_can_read_matches_authority(
        steps in prop::collection::vec((small_principal(4), op()), 1..30),
        probe in small_principal(5),
    ) {
        let mut registry = Registry::new(RegistryConfig::new(admin()));
        for (height, (sender, op)) in steps.into_iter().enumerate() {
            let _ = apply(&mut registry, &TxContext::new(sender, height as u64), op);
        }

        for id in 1..6 {
            let id = RecordId::new(id);
            let expected = match registry.store().get_record(&id) {
                None => false,
                Some(record) => {
                    record.controller == probe
                        || probe == admin()
                        || registry.permissions().is_granted(id, &probe)
                }
            };
            prop_assert_eq!(registry.can_read(id, &probe), expected);

            let result = registry.inspect(&TxContext::new(probe, 100), id);
            match (registry.store().has_record(&id), expected) {
                (false, _) => prop_assert_eq!(result.unwrap_err().code(), ErrorCode::RecordNotFound),
                (true, true) => prop_assert!(result.is_ok()),
                (true, false) => prop_assert_eq!(result.unwrap_err().code(), ErrorCode::UnauthorizedAction),
            }
        }
    }

    #[test]
    fn test_snapshot_roundtrip_keeps_digest(
        steps in prop::collection::vec((small_principal(4), op()), 1..30)
    ) {
        let mut registry = Registry::new(RegistryConfig::new(admin()));
        for (height, (sender, op)) in steps.into_iter().enumerate() {
            let _ = apply(&mut registry, &TxContext::new(sender, height as u64), op);
        }

        let bytes = registry.snapshot().to_cbor().unwrap();
        let snapshot = attest_registry::RegistrySnapshot::from_cbor(&bytes).unwrap();
        let restored = Registry::restore(snapshot).unwrap();
        prop_assert_eq!(restored.state_digest(), registry.state_digest());
    }
}
