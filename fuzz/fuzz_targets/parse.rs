#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate fwps;

fuzz_target!(|data: &[u8]| {
    let _ = fwps::Store::decode(data, 1252);
});
