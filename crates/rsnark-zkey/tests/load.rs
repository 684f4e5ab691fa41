// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zkey / wtns loading against artifacts written by the fixture setup.

use std::{io::Write, sync::Arc};

use rsnark_curve::{encoding::write_fq_montgomery, Fq};
use rsnark_fixtures::{writer, Fixture, Section};
use rsnark_zkey::{
    load, parse_wtns, read_header, ProvingKey, ZkeyCache, ZkeyError, ZkeySource,
};

fn rebuilt(sections: Vec<Section>) -> Vec<u8> {
    writer::assemble(b"zkey", 1, &sections)
}

fn replace_section(fixture: &Fixture, id: u32, payload: Vec<u8>) -> Vec<u8> {
    let sections = fixture
        .sections
        .iter()
        .map(|(s, p)| if *s == id { (*s, payload.clone()) } else { (*s, p.clone()) })
        .collect();
    rebuilt(sections)
}

#[test]
fn loads_every_query_from_memory() {
    for f in rsnark_fixtures::all().unwrap() {
        let key = ProvingKey::from_bytes(&f.zkey).unwrap();
        assert_eq!(key.n_vars(), f.n_vars());
        assert_eq!(key.n_public(), f.n_public());
        assert_eq!(key.domain_size(), f.domain_size);

        assert_eq!(*key.alpha1(), f.pk.vk.alpha_g1);
        assert_eq!(*key.beta1(), f.pk.beta_g1);
        assert_eq!(*key.beta2(), f.pk.vk.beta_g2);
        assert_eq!(*key.gamma2(), f.pk.vk.gamma_g2);
        assert_eq!(*key.delta1(), f.pk.delta_g1);
        assert_eq!(*key.delta2(), f.pk.vk.delta_g2);
        assert_eq!(key.ic(), &f.vk.gamma_abc_g1[..]);
        assert_eq!(key.a_query(), &f.pk.a_query[..]);
        assert_eq!(key.b1_query(), &f.pk.b_g1_query[..]);
        assert_eq!(key.b2_query(), &f.pk.b_g2_query[..]);
        assert_eq!(key.c_query(), &f.pk.l_query[..]);
        assert_eq!(key.h_query(), &f.pk.h_query[..]);
    }
}

#[test]
fn file_and_memory_sources_agree() {
    let f = rsnark_fixtures::power_chain().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&f.zkey).unwrap();

    let from_file = load(ZkeySource::File(file.path())).unwrap();
    let from_bytes = load(ZkeySource::Bytes(&f.zkey)).unwrap();
    assert_eq!(from_file, from_bytes);
    assert_eq!(ProvingKey::from_file(file.path()).unwrap(), from_bytes);
}

#[test]
fn header_prepass_matches_full_load() {
    let f = rsnark_fixtures::power_chain().unwrap();
    let header = read_header(ZkeySource::Bytes(&f.zkey)).unwrap();
    let key = ProvingKey::from_bytes(&f.zkey).unwrap();
    assert_eq!(&header, key.header());
    assert_eq!(header.n_public, 3);
    assert_eq!(header.public_output_size(), 2 + 3 * 79 + 2 + 1);
    assert_eq!(key.public_output_size(), header.public_output_size());
}

#[test]
fn header_prepass_ignores_broken_point_sections() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let broken = replace_section(f, 5, vec![0xff; 64 * 4]);
    assert!(read_header(ZkeySource::Bytes(&broken)).is_ok());
    assert!(ProvingKey::from_bytes(&broken).is_err());
}

#[test]
fn verification_key_extraction() {
    let f = rsnark_fixtures::square_plus_five().unwrap();
    let vk = ProvingKey::from_bytes(&f.zkey).unwrap().verification_key();
    assert_eq!(vk.alpha1, f.vk.alpha_g1);
    assert_eq!(vk.beta2, f.vk.beta_g2);
    assert_eq!(vk.gamma2, f.vk.gamma_g2);
    assert_eq!(vk.delta2, f.vk.delta_g2);
    assert_eq!(vk.ic, f.vk.gamma_abc_g1);
    assert_eq!(vk.n_public(), 1);
}

#[test]
fn truncated_zkey_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let cut = &f.zkey[..f.zkey.len() - 1];
    assert!(matches!(
        ProvingKey::from_bytes(cut),
        Err(ZkeyError::Truncated { section: 10, .. })
    ));
    assert!(matches!(
        ProvingKey::from_bytes(&f.zkey[..10]),
        Err(ZkeyError::Io(_))
    ));
}

#[test]
fn bad_magic_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let mut bytes = f.zkey.clone();
    bytes[0] = b'Z';
    assert!(matches!(
        ProvingKey::from_bytes(&bytes),
        Err(ZkeyError::BadMagic { .. })
    ));
}

#[test]
fn duplicate_and_missing_sections_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();

    let mut dup = f.sections.clone();
    dup.push(f.sections[2].clone());
    assert!(matches!(
        ProvingKey::from_bytes(&rebuilt(dup)),
        Err(ZkeyError::DuplicateSection(3))
    ));

    let missing: Vec<Section> = f.sections.iter().filter(|(id, _)| *id != 8).cloned().collect();
    assert!(matches!(
        ProvingKey::from_bytes(&rebuilt(missing)),
        Err(ZkeyError::MissingSection(8))
    ));
}

#[test]
fn section_order_does_not_matter() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let mut reversed = f.sections.clone();
    reversed.reverse();
    assert_eq!(
        ProvingKey::from_bytes(&rebuilt(reversed)).unwrap(),
        ProvingKey::from_bytes(&f.zkey).unwrap()
    );
}

#[test]
fn wrong_section_size_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let mut payload = f.sections[4].1.clone();
    payload.extend_from_slice(&[0u8; 64]);
    let bytes = replace_section(f, 5, payload);
    assert!(matches!(
        ProvingKey::from_bytes(&bytes),
        Err(ZkeyError::SectionSize { section: 5, .. })
    ));
}

#[test]
fn off_curve_point_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let mut payload = f.sections[4].1.clone();
    let one = write_fq_montgomery(&Fq::from(1u64));
    payload[64..96].copy_from_slice(&one);
    payload[96..128].copy_from_slice(&one);
    let bytes = replace_section(f, 5, payload);
    assert!(matches!(
        ProvingKey::from_bytes(&bytes),
        Err(ZkeyError::Point { section: 5, index: 1, .. })
    ));
}

#[test]
fn non_groth16_protocol_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let bytes = replace_section(f, 1, 2u32.to_le_bytes().to_vec());
    assert!(matches!(
        ProvingKey::from_bytes(&bytes),
        Err(ZkeyError::UnsupportedProtocol(2))
    ));
    assert!(matches!(
        read_header(ZkeySource::Bytes(&bytes)),
        Err(ZkeyError::UnsupportedProtocol(2))
    ));
}

#[test]
fn coefficient_signal_out_of_range_rejected() {
    let f = rsnark_fixtures::multiplier().unwrap();
    let mut payload = f.sections[3].1.clone();
    // First record: skip n_coefs (4), matrix (4), constraint (4) to the signal.
    payload[12..16].copy_from_slice(&99u32.to_le_bytes());
    let bytes = replace_section(f, 4, payload);
    assert!(matches!(
        ProvingKey::from_bytes(&bytes),
        Err(ZkeyError::Coefficient { index: 0, .. })
    ));
}

#[test]
fn witness_file_roundtrip() {
    let f = rsnark_fixtures::multiplier().unwrap();
    assert_eq!(parse_wtns(&f.wtns).unwrap(), f.witness);
    assert!(matches!(parse_wtns(&f.zkey), Err(ZkeyError::BadMagic { .. })));
}

#[test]
fn cache_reuses_until_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circuit.zkey");
    let small = rsnark_fixtures::multiplier().unwrap();
    let large = rsnark_fixtures::power_chain().unwrap();
    std::fs::write(&path, &small.zkey).unwrap();

    let cache = ZkeyCache::new();
    let first = cache.get_or_load(&path).unwrap();
    let second = cache.get_or_load(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    std::fs::write(&path, &large.zkey).unwrap();
    let third = cache.get_or_load(&path).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.n_public(), 3);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}
