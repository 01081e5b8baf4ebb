#![no_main]

use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use zerocoin::{AccumulatorParams, IntegerGroupParams, Params, PublicCoin};

fn params() -> Arc<Params> {
    static PARAMS: OnceLock<Arc<Params>> = OnceLock::new();
    PARAMS
        .get_or_init(|| {
            let group = IntegerGroupParams::new(
                BigUint::from(4u32),
                BigUint::from(9u32),
                BigUint::from(1019u32),
                BigUint::from(509u32),
            )
            .unwrap();
            let bounds =
                AccumulatorParams::new(BigUint::from(100u32), BigUint::from(1000u32)).unwrap();
            Arc::new(Params::new(group, bounds, 20).unwrap())
        })
        .clone()
}

fuzz_target!(|data: &[u8]| {
    if let Ok(coin) = PublicCoin::from_bytes(params(), data) {
        let _ = coin.validate();
        // every accepted encoding is the canonical one
        assert_eq!(coin.to_bytes().unwrap(), data);
    }
});
