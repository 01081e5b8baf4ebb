#![no_main]

use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use zerocoin::{AccumulatorParams, Denomination, IntegerGroupParams, Params, PublicCoin};

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
            let bounds = AccumulatorParams::new(BigUint::from(1u32), BigUint::from(1u32) << 256u32)
                .unwrap();
            Arc::new(Params::new(group, bounds, 20).unwrap())
        })
        .clone()
}

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 {
        return;
    }

    let value = BigUint::from_bytes_be(data);
    let coin = PublicCoin::from_value(params(), value, Denomination::One).unwrap();
    let _ = coin.validate();
});
