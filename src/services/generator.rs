//! Synthetic transaction generator.
//! Every field is drawn independently from its own distribution.

use chrono::{SubsecRound, Utc};
use fake::faker::address::en::{CityName, CountryName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::Fake;
use rand::Rng;
use std::net::Ipv4Addr;
use uuid::Uuid;

use crate::domain::transaction::{MAX_AMOUNT, MIN_AMOUNT, VOUCHER_CODE};
use crate::domain::{Currency, PaymentMethod, Transaction};

/// Two empty slots against one code gives a voucher on a third of records.
const VOUCHER_CHOICES: [&str; 3] = ["", VOUCHER_CODE, ""];

/// Generates one transaction from the thread-local RNG.
pub fn generate() -> Transaction {
    generate_with_rng(&mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng + ?Sized>(rng: &mut R) -> Transaction {
    Transaction {
        transaction_id: random_uuid(rng),
        user_id: Username().fake_with_rng(rng),
        // Postgres keeps microseconds; truncating here keeps the stored row equal to the value.
        timestamp: Utc::now().trunc_subsecs(6),
        amount: random_amount(rng),
        currency: Currency::ALL[rng.gen_range(0..Currency::ALL.len())],
        city: CityName().fake_with_rng(rng),
        country: CountryName().fake_with_rng(rng),
        merchant_name: CompanyName().fake_with_rng(rng),
        payment_method: PaymentMethod::ALL[rng.gen_range(0..PaymentMethod::ALL.len())],
        ip_address: Ipv4Addr::from(rng.gen::<[u8; 4]>()),
        voucher_code: VOUCHER_CHOICES[rng.gen_range(0..VOUCHER_CHOICES.len())].to_string(),
        affiliate_id: random_uuid(rng),
    }
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

fn random_amount<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw = rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT);
    ((raw * 100.0).round() / 100.0).clamp(MIN_AMOUNT, MAX_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const DRAWS: usize = 2_000;

    fn batch(seed: u64) -> Vec<Transaction> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..DRAWS).map(|_| generate_with_rng(&mut rng)).collect()
    }

    #[test]
    fn test_amount_within_range_and_rounded() {
        for tx in batch(1) {
            assert!(
                (MIN_AMOUNT..=MAX_AMOUNT).contains(&tx.amount),
                "amount out of range: {}",
                tx.amount
            );
            let cents = tx.amount * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-6,
                "amount has more than 2 decimals: {}",
                tx.amount
            );
        }
    }

    #[test]
    fn test_enumerated_fields_come_from_fixed_sets() {
        let txs = batch(2);
        let currencies: HashSet<&str> = txs.iter().map(|t| t.currency.as_str()).collect();
        let methods: HashSet<&str> = txs.iter().map(|t| t.payment_method.as_str()).collect();

        let allowed_currencies: HashSet<&str> = ["USD", "GBP", "MAD"].into_iter().collect();
        let allowed_methods: HashSet<&str> = ["credit_card", "debit_card", "online_transfer"]
            .into_iter()
            .collect();

        assert_eq!(currencies, allowed_currencies);
        assert_eq!(methods, allowed_methods);
    }

    #[test]
    fn test_voucher_code_is_empty_or_fixed() {
        let txs = batch(3);
        assert!(txs
            .iter()
            .all(|t| t.voucher_code.is_empty() || t.voucher_code == VOUCHER_CODE));

        let with_voucher = txs.iter().filter(|t| t.has_voucher()).count();
        // Expected share is a third; leave generous slack for the seeded run.
        assert!(with_voucher > DRAWS / 5, "too few vouchers: {}", with_voucher);
        assert!(with_voucher < DRAWS / 2, "too many vouchers: {}", with_voucher);
    }

    #[test]
    fn test_identifiers_are_independent_v4_uuids() {
        let txs = batch(4);
        let mut seen = HashSet::new();
        for tx in &txs {
            assert_eq!(tx.transaction_id.get_version_num(), 4);
            assert_eq!(tx.affiliate_id.get_version_num(), 4);
            assert_ne!(tx.transaction_id, tx.affiliate_id);
            assert!(seen.insert(tx.transaction_id));
        }
    }

    #[test]
    fn test_text_fields_are_populated() {
        for tx in batch(5).iter().take(100) {
            assert!(!tx.user_id.is_empty());
            assert!(!tx.city.is_empty());
            assert!(!tx.country.is_empty());
            assert!(!tx.merchant_name.is_empty());
        }
    }

    #[test]
    fn test_timestamp_has_microsecond_precision() {
        let tx = generate();
        assert_eq!(tx.timestamp.timestamp_subsec_nanos() % 1_000, 0);
        assert!(tx.timestamp <= Utc::now());
    }

    #[test]
    fn test_consecutive_calls_differ() {
        let a = generate();
        let b = generate();
        assert_ne!(a.transaction_id, b.transaction_id);
    }
}
