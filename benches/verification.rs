//! Signature validation benchmarks.
//!
//! Run with: `cargo bench --bench verification`

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use order_core::signing::{BulkOrderSigner, Eip712Domain, OrderHasher, SignatureFormat};
use order_core::types::{ConsiderationItem, OfferItem, OrderComponents};
use signature_validator::{BulkSignatureEnvelope, BulkSignatureVerifier, SingleOwner, VerifierContext};

const CHAIN_ID: u64 = 1;

fn contract() -> Address {
    Address::repeat_byte(0x5e)
}

fn sample_orders(offerer: Address, count: u64) -> Vec<OrderComponents> {
    (0..count)
        .map(|salt| OrderComponents {
            offerer,
            offer: vec![OfferItem::erc721(Address::repeat_byte(0xaa), U256::from(salt))],
            consideration: vec![ConsiderationItem::native(U256::from(1_000_000u64), offerer)],
            salt: U256::from(salt),
            ..Default::default()
        })
        .collect()
}

/// Sign a batch and return the message and envelope of its first order.
fn signed_envelope(count: u64, format: SignatureFormat) -> (Address, B256, Bytes) {
    let key = PrivateKeySigner::random();
    let owner = key.address();
    let signer = BulkOrderSigner::new(key, Eip712Domain::seaport(CHAIN_ID, contract()));
    let orders = sample_orders(owner, count);

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let signed = runtime.block_on(signer.sign_bulk(&orders, format)).unwrap();

    let message = signer
        .domain()
        .typed_data_hash(OrderHasher::hash(&orders[0]));
    let envelope = BulkSignatureEnvelope::for_order(signed.signatures[0].clone(), &orders[0]);

    (owner, message, envelope.encode())
}

/// Benchmark full bulk validation by batch size.
fn bench_bulk_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_validation");

    for count in [1u64, 8, 1024].iter() {
        let (owner, message, envelope) = signed_envelope(*count, SignatureFormat::Full);
        let verifier =
            BulkSignatureVerifier::new(VerifierContext::new(CHAIN_ID, contract()), SingleOwner::new(owner));

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("orders", count), &envelope, |b, envelope| {
            b.iter(|| black_box(verifier.is_valid_signature(black_box(message), envelope)))
        });
    }

    group.finish();
}

/// Benchmark envelope decoding alone.
fn bench_envelope_decode(c: &mut Criterion) {
    let (_, _, envelope) = signed_envelope(8, SignatureFormat::Compact);

    c.bench_function("envelope_decode", |b| {
        b.iter(|| black_box(BulkSignatureEnvelope::decode(black_box(&envelope))))
    });
}

criterion_group!(benches, bench_bulk_validation, bench_envelope_decode);
criterion_main!(benches);
