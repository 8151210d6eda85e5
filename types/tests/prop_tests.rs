use proptest::prelude::*;

use bank_types::{Amount, Coin, Coins, Denom, Timestamp};

fn denom_strategy() -> impl Strategy<Value = Denom> {
    "[a-z][a-z0-9]{2,8}".prop_map(|s| Denom::new(s).unwrap())
}

fn coin_vec_strategy() -> impl Strategy<Value = Vec<Coin>> {
    prop::collection::btree_map(denom_strategy(), 0u64..1_000_000, 0..8).prop_map(|m| {
        m.into_iter()
            .map(|(denom, amount)| Coin::new(denom, amount))
            .collect()
    })
}

proptest! {
    /// A coin set built from any permutation is sorted, unique and zero-free.
    #[test]
    fn coins_canonical_regardless_of_order(mut raw in coin_vec_strategy(), seed in any::<u64>()) {
        let n = raw.len();
        if n > 1 {
            raw.rotate_left((seed as usize) % n);
        }
        let set = Coins::new(raw.clone()).unwrap();
        prop_assert!(set.iter().all(|c| !c.is_zero()));
        prop_assert!(set.as_slice().windows(2).all(|w| w[0].denom < w[1].denom));
        prop_assert_eq!(set.len(), raw.iter().filter(|c| !c.is_zero()).count());
    }

    /// (a + b) - b == a
    #[test]
    fn add_then_sub_restores(a in coin_vec_strategy(), b in coin_vec_strategy()) {
        let a = Coins::new(a).unwrap();
        let b = Coins::new(b).unwrap();
        let sum = a.checked_add(&b).unwrap();
        prop_assert!(sum.is_all_gte(&a));
        prop_assert!(sum.is_all_gte(&b));
        prop_assert_eq!(sum.checked_sub(&b), Some(a));
    }

    /// Saturating subtraction never exceeds the minuend and never holds zeros.
    #[test]
    fn saturating_sub_bounded(a in coin_vec_strategy(), b in coin_vec_strategy()) {
        let a = Coins::new(a).unwrap();
        let b = Coins::new(b).unwrap();
        let diff = a.saturating_sub(&b);
        prop_assert!(a.is_all_gte(&diff));
        prop_assert!(diff.iter().all(|c| !c.is_zero()));
    }

    /// Textual coin sets parse back to the same set.
    #[test]
    fn coins_display_parses_back(raw in coin_vec_strategy()) {
        let set = Coins::new(raw).unwrap();
        let parsed: Coins = set.to_string().parse().unwrap();
        prop_assert_eq!(parsed, set);
    }

    /// Amounts keep their numeric ordering in the big-endian storage encoding.
    #[test]
    fn amount_be_bytes_preserve_order(a in any::<u128>(), b in any::<u128>()) {
        let (ea, eb) = (Amount::from(a).to_be_bytes(), Amount::from(b).to_be_bytes());
        prop_assert_eq!(ea.cmp(&eb), a.cmp(&b));
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(base in 1u64..1_000_000, deficit in 1u64..1_000_000) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
        prop_assert_eq!(earlier.elapsed_since(later), deficit);
    }
}
