use voiceprint::embedding::{EmbeddingGenerator, DEFAULT_DIMENSION};

#[test]
fn test_generate_twice_is_bit_identical() {
    let generator = EmbeddingGenerator::new(DEFAULT_DIMENSION).unwrap();

    let a = generator.generate("determinism-check");
    let b = generator.generate("determinism-check");

    assert_eq!(a.vector.len(), DEFAULT_DIMENSION);
    for (x, y) in a.vector.iter().zip(&b.vector) {
        assert_eq!(x.to_bits(), y.to_bits());
    }
    assert_eq!(a.vector_hash, b.vector_hash);
}

#[test]
fn test_vectors_are_unit_length() {
    let generator = EmbeddingGenerator::new(DEFAULT_DIMENSION).unwrap();

    for file_id in ["a", "file-123", "/uploads/voice.wav", "日本語"] {
        let generated = generator.generate(file_id);
        let norm = generated.vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!(
            (norm - 1.0).abs() < 1e-9,
            "norm for {file_id} was {norm}"
        );
    }
}

#[test]
fn test_dimension_invariant() {
    for dimension in [1, 4, 64, 256, 512] {
        let generator = EmbeddingGenerator::new(dimension).unwrap();
        assert_eq!(generator.generate("file-123").vector.len(), dimension);
    }
}

#[test]
fn test_zero_dimension_is_invalid() {
    let err = EmbeddingGenerator::new(0).unwrap_err();
    assert_eq!(err.category(), "validation");
}

#[test]
fn test_hash_depends_only_on_f32_representation() {
    let generator = EmbeddingGenerator::new(128).unwrap();
    let generated = generator.generate("hash-stability");

    assert_eq!(
        EmbeddingGenerator::fingerprint(&generated.vector),
        generated.vector_hash
    );

    // Sub-f32 perturbations vanish in the truncation.
    let nudged: Vec<f64> = generated.vector.iter().map(|v| v + 1e-13).collect();
    assert_eq!(
        EmbeddingGenerator::fingerprint(&nudged),
        generated.vector_hash
    );
}

#[test]
fn test_different_files_different_vectors() {
    let generator = EmbeddingGenerator::new(256).unwrap();

    let a = generator.generate("fileA");
    let b = generator.generate("fileB");

    assert_ne!(a.vector, b.vector);
    assert_eq!(
        a.vector_hash,
        "34b0941ec1e06df326888215da3928b9fd7f4d9af719dad672a81e727a6487a9"
    );
    assert_eq!(
        b.vector_hash,
        "0a15a22d9874dc29689fb755c5c7e09c0a7b5914fdcdfd07b42bc3b011084024"
    );
}

#[test]
fn test_empty_file_id() {
    let generator = EmbeddingGenerator::new(8).unwrap();
    let generated = generator.generate("");

    assert_eq!(generated.vector.len(), 8);
    let norm = generated.vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    assert!((norm - 1.0).abs() < 1e-9);

    // Reproducible: the empty id seeds to zero, not an error.
    assert_eq!(generated.vector_hash, generator.generate("").vector_hash);
}

// Golden values for "file-123" at dimension 4, fixed by the generation
// rules (seed 736753055). Catches drift in seeding, LCG arithmetic,
// normalization, and fingerprint encoding.
#[test]
fn test_golden_reference_vector() {
    let generator = EmbeddingGenerator::new(4).unwrap();
    let generated = generator.generate("file-123");

    let expected = [
        0.4523428855237691_f64,
        0.0356830547157252_f64,
        0.315259278558128_f64,
        0.8335011822458283_f64,
    ];
    for (actual, expected) in generated.vector.iter().zip(expected) {
        assert_eq!(actual.to_bits(), expected.to_bits());
    }
    assert_eq!(
        generated.vector_hash,
        "c4f2375eacf8aa4a4632903e264240e8580a692a3fa115d2c1325f351eb208a6"
    );
}

#[test]
fn test_golden_hash_at_default_dimension() {
    let generator = EmbeddingGenerator::new(DEFAULT_DIMENSION).unwrap();
    assert_eq!(
        generator.generate("file-123").vector_hash,
        "d7acb6952b8ad0960ce5d6abedfa3b37b6f58166825918860f367746b4cfa083"
    );
}
