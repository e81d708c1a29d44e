//! Behavioural properties of key derivation.
use argon2::{Algorithm, Argon2, Block, Error, MAX_LANES, Params, ParamsBuilder};
use hex_literal::hex;

const SCENARIO_TAG: [u8; 32] =
    hex!("f137f8e186a403a679ccd0606e5ab5dcdafe43c1640855ac8c6e33e9bd63eeb3");

fn scenario() -> ParamsBuilder {
    let mut builder = Params::builder();
    builder
        .algorithm(Algorithm::Argon2id)
        .salt(b"somesalt")
        .iterations(1)
        .memory(8)
        .lanes(1);
    builder
}

fn derive(password: &[u8], params: &Params, len: usize) -> Vec<u8> {
    argon2::derive_key(password, params, len).unwrap().to_vec()
}

#[test]
fn deterministic() {
    let params = scenario().build().unwrap();
    let first = derive(b"password", &params, 32);
    let second = derive(b"password", &params, 32);
    assert_eq!(first, second);
    assert_eq!(first, SCENARIO_TAG);
}

#[test]
fn context_matches_free_functions() {
    let params = scenario().build().unwrap();
    let ctx = Argon2::new(params.clone());
    assert_eq!(ctx.params().memory(), 8);
    assert_eq!(*ctx.derive_key(b"password", 32).unwrap(), SCENARIO_TAG);

    let mut out = [0u8; 32];
    argon2::derive_key_into(b"password", &params, &mut out).unwrap();
    assert_eq!(out, SCENARIO_TAG);
}

#[test]
fn single_bit_flip_changes_whole_output() {
    let params = scenario().build().unwrap();
    // "passwore" differs from "password" in the lowest bit of the last byte
    let flipped = derive(b"passwore", &params, 32);
    assert_eq!(
        flipped,
        hex!("dcf4b7602c8f2a14ed86898e608ba4a1dc78a12b64907b14d074284231ca49ff")
    );

    let differing_bits: u32 = flipped
        .iter()
        .zip(SCENARIO_TAG.iter())
        .map(|(a, b)| (a ^ b).count_ones())
        .sum();
    let equal_bytes = flipped
        .iter()
        .zip(SCENARIO_TAG.iter())
        .filter(|(a, b)| a == b)
        .count();

    assert!((64..=192).contains(&differing_bits));
    assert!(equal_bytes <= 4);
}

#[test]
fn memory_cost_changes_output() {
    let params = scenario().memory(16).build().unwrap();
    let tag = derive(b"password", &params, 32);
    assert_ne!(tag, SCENARIO_TAG);
    assert_eq!(
        tag,
        hex!("3fd1f4fd38592d783450391972abe3cc1c2f2b58f8d8cbfda86a857d81d25f8d")
    );
}

#[test]
fn output_lengths() {
    let params = scenario().build().unwrap();

    assert_eq!(derive(b"password", &params, 4), hex!("6b7a947d"));
    assert_eq!(derive(b"password", &params, 32), SCENARIO_TAG);
    assert_eq!(
        derive(b"password", &params, 64),
        hex!(
            "
            1437f91898f231ac18bc80cbcd32883b34264c2927195fec7a77732269270336
            88422945a19069302e7e70233131350f89cb8a96daa78cee92f6b8416a5efd6c
            "
        )
    );
    assert_eq!(
        derive(b"password", &params, 65),
        hex!(
            "
            8312a1bdee14a6d32536e6431973022d944b1083e293aac8591b4a5efce2e2a3
            1136619e4dca5f7b66c2e276d63493204d058460930f1ab523546bb4d324361d
            dd
            "
        )
    );
    assert_eq!(
        derive(b"password", &params, 128),
        hex!(
            "
            582a93e70ab3ac439ece470306d7dc4935c96b69657d4dd292897ca6c5d9aac8
            aa6805912c135be5fe97d8d989ef4e6410c9c4cfe6ba6b4391849045d4f8a116
            dd1808b679c12ef51b859c8bc328328b78d4dc25ea1e0fc099586734723dcbb7
            653856397b82f6349094f5f6b797ac9d84f048eb1b6fca68dac3ffdac9365252
            "
        )
    );
}

#[test]
fn parameter_errors() {
    let cases: [(ParamsBuilder, Error); 5] = [
        ({ let mut b = scenario(); b.lanes(0); b }, Error::LanesTooSmall),
        ({ let mut b = scenario(); b.lanes(MAX_LANES + 1); b }, Error::LanesTooBig),
        ({ let mut b = scenario(); b.lanes(4).memory(7); b }, Error::MemoryTooSmall),
        ({ let mut b = scenario(); b.iterations(0); b }, Error::IterationsTooSmall),
        ({ let mut b = scenario(); b.memory_power_of_two(32); b }, Error::MemoryTooLarge),
    ];

    for (builder, expected) in cases {
        assert_eq!(builder.build().unwrap_err(), expected);
    }

    let mut unsalted = Params::builder();
    unsalted.iterations(1).memory(8);
    assert_eq!(
        unsalted.build().unwrap_err(),
        Error::MissingRequiredInput("salt")
    );
}

#[test]
fn output_length_errors() {
    let params = scenario().build().unwrap();
    assert_eq!(
        argon2::derive_key(b"password", &params, 3).unwrap_err(),
        Error::OutputTooShort
    );
    assert_eq!(
        argon2::derive_key_into(b"password", &params, &mut []),
        Err(Error::OutputTooShort)
    );
}

#[test]
fn required_blocks() {
    let ctx = Argon2::new(scenario().memory(37).lanes(4).build().unwrap());
    assert_eq!(ctx.required_blocks(), 32);

    let ctx = Argon2::new(scenario().memory(2).build().unwrap());
    assert_eq!(ctx.required_blocks(), 8);
}

#[test]
fn caller_supplied_memory() {
    let ctx = Argon2::new(scenario().build().unwrap());
    let mut out = [0u8; 32];

    let mut short = vec![Block::new(); ctx.required_blocks() - 1];
    assert_eq!(
        ctx.fill_memory(b"password", &mut out, &mut short),
        Err(Error::BufferTooSmall)
    );

    let mut blocks = vec![Block::new(); ctx.required_blocks()];
    ctx.fill_memory(b"password", &mut out, &mut blocks).unwrap();
    assert_eq!(out, SCENARIO_TAG);
}

#[test]
fn error_messages() {
    assert_eq!(Error::LanesTooSmall.to_string(), "too few lanes");
    assert_eq!(
        Error::MissingRequiredInput("salt").to_string(),
        "missing required input: salt"
    );
}
