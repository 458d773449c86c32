//! # Token Holder Benchmarks
//!
//! | Path | What is measured |
//! |------|------------------|
//! | Message hash | EIP-1077 preimage packing + Keccak-256 |
//! | Signer recovery | secp256k1 public key recovery from `(v, r, s)` |
//! | Signed execution | verify → allowance → rule → registry → token → cleanup |
//! | Constraint checks | `executeTransfers` with a growing constraint set |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{Address, U256};
use tr_01_rule_registry::{MaxAmountConstraint, TransferRule};
use tr_02_token_holder::domain::{message_hash, recover_signer};
use tr_02_token_holder::execute_rule_call_prefix;
use tr_02_token_holder::test_helpers::{generate_ephemeral_key, sign_call};
use tr_tests::fixtures::addresses::{ALICE, HOLDER, TRANSFER_RULE};
use tr_tests::fixtures::World;

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("tr-02-verification");
    group.measurement_time(Duration::from_secs(10));

    let data = TransferRule::transfer_from_calldata(HOLDER, ALICE, U256::from(50));
    let prefix = execute_rule_call_prefix();

    group.bench_function("message_hash", |b| {
        b.iter(|| {
            black_box(message_hash(
                black_box(HOLDER),
                TRANSFER_RULE,
                &data,
                U256::one(),
                prefix,
            ))
        })
    });

    let (key, _) = generate_ephemeral_key();
    let hash = message_hash(HOLDER, TRANSFER_RULE, &data, U256::one(), prefix);
    let signature = sign_call(HOLDER, prefix, TRANSFER_RULE, &data, U256::one(), &key);

    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(recover_signer(black_box(&hash), &signature)))
    });

    group.finish();
}

fn bench_signed_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("tr-02-execute-rule");
    group.measurement_time(Duration::from_secs(10));

    for constraints in [0usize, 4, 16] {
        let world = World::builder().with_balance(u64::MAX).build();
        for i in 0..constraints {
            world.add_constraint(
                Address::repeat_byte(0xc0 + i as u8),
                Arc::new(MaxAmountConstraint::new(U256::from(1_000))),
            );
        }
        let session = world.authorize_key(1_000, 1_000_000);
        let mut nonce = 0u64;

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("transfer_with_constraints", constraints),
            &constraints,
            |b, _| {
                b.iter(|| {
                    nonce += 1;
                    black_box(world.transfer(&session, ALICE, 1, nonce))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_verification, bench_signed_execution);
criterion_main!(benches);
