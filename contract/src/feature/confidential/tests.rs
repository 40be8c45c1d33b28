#![cfg(test)]

use near_sdk::AccountId;
use road_safety_model::{
    api::{ConfidentialApi, QueryApi},
    ConfidentialCapability, Derivation, Handle, LedgerError,
};
use rstest::rstest;

use crate::{
    common::{
        event::{AllowData, ComputationData, EventKind},
        testing::{accounts::*, expect_panic, Context},
    },
    feature::confidential::model::{test_utils::RevealError, Coprocessor},
};

#[rstest]
fn input_is_registered_for_owner(admin: AccountId, alice: AccountId) {
    let mut context = Context::new(admin);

    let handle = context.submit(&alice, 80, 1).unwrap();

    assert_eq!(
        context.contract().get_derivation(handle),
        Some(Derivation::Input { owner: alice.clone() })
    );
    assert!(context.contract().is_allowed(handle, alice));
}

#[rstest]
fn input_bound_to_owner(admin: AccountId, alice: AccountId, bob: AccountId) {
    let mut context = Context::new(admin);

    let (handle, proof) = context.oracle.encrypt(80, &alice);

    let mut contract = context.contract();
    assert_eq!(
        contract.coprocessor.verify_input(handle, &proof.0, &bob),
        Err(LedgerError::InvalidProof)
    );
    assert_eq!(contract.get_derivation(handle), None);

    assert_eq!(contract.coprocessor.verify_input(handle, &proof.0, &alice), Ok(handle));
    assert!(contract.get_derivation(handle).is_some());
}

#[rstest]
fn derived_handles_are_deterministic(admin: AccountId, alice: AccountId) {
    let mut context = Context::new(admin);

    let lhs = context.submit(&alice, 80, 1).unwrap();
    context.advance_block_timestamp_days(1);
    let rhs = context.submit(&alice, 90, 1).unwrap();

    let total = context.contract().get_average_data(alice.clone()).total.unwrap();
    let trend = context.contract().get_trend(alice.clone()).unwrap();

    let mut contract = context.contract();
    assert_eq!(contract.coprocessor.add(lhs, rhs), total);
    assert_eq!(contract.coprocessor.subtract(rhs, lhs), trend);

    assert_ne!(contract.coprocessor.add(rhs, lhs), total);
    assert_ne!(contract.coprocessor.subtract(lhs, rhs), trend);
    assert_ne!(total, trend);

    assert_eq!(contract.get_derivation(total), Some(Derivation::Add { lhs, rhs }));
    assert_eq!(contract.get_derivation(trend), Some(Derivation::Sub { lhs: rhs, rhs: lhs }));
}

#[rstest]
fn computation_is_announced_once(admin: AccountId, alice: AccountId) {
    let mut context = Context::new(admin);

    let lhs = context.submit(&alice, 1, 1).unwrap();
    context.advance_block_timestamp_days(1);
    let rhs = context.submit(&alice, 2, 1).unwrap();

    let result = context.contract().coprocessor.add(lhs, rhs);

    let computations: Vec<_> = context
        .get_events()
        .into_iter()
        .filter_map(|event| match event {
            EventKind::Computation(data) => Some(data),
            _ => None,
        })
        .collect();

    assert_eq!(computations.len(), 2);
    assert!(computations.contains(&ComputationData {
        result,
        derivation: Derivation::Add { lhs, rhs },
    }));
}

#[rstest]
fn grant_is_idempotent(admin: AccountId, alice: AccountId, bob: AccountId) {
    let mut context = Context::new(admin);

    let handle = context.submit(&alice, 80, 1).unwrap();

    {
        let mut contract = context.contract();
        contract.coprocessor.grant(handle, &alice);
        contract.coprocessor.grant(handle, &bob);
        contract.coprocessor.grant(handle, &bob);
    }

    let grants: Vec<_> = context
        .get_events()
        .into_iter()
        .filter_map(|event| match event {
            EventKind::Allow(data) => Some(data),
            _ => None,
        })
        .collect();

    assert_eq!(
        grants,
        vec![
            AllowData {
                handle,
                account_id: alice.clone(),
            },
            AllowData {
                handle,
                account_id: bob.clone(),
            },
        ]
    );

    assert_eq!(context.reveal(handle, &bob), Ok(80));
}

#[rstest]
fn unknown_handle(admin: AccountId, alice: AccountId) {
    let context = Context::new(admin);

    let handle = Handle::new([9; 32]);

    assert_eq!(context.contract().get_derivation(handle), None);
    assert!(!context.contract().is_allowed(handle, alice.clone()));

    context.contract().coprocessor.grant(handle, &alice);
    assert_eq!(context.reveal(handle, &alice), Err(RevealError::UnknownHandle));
}

#[rstest]
fn verifier_key(admin: AccountId) {
    let context = Context::new(admin);

    assert_eq!(context.contract().get_verifier_key().0, context.oracle.public_key());
}

#[rstest]
fn init_with_malformed_key(admin: AccountId) {
    let _context = Context::new(admin);

    expect_panic(&(), "Public key must be 32 bytes", || {
        Coprocessor::new(vec![0; 31], b"d".to_vec(), b"a".to_vec());
    });
}
