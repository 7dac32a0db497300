use cpf_check::{complete, mask, normalize, validate, Cpf, InvalidReason, ValidationOutcome};

const VALID_CPFS: [&str; 4] = ["11144477735", "52998224725", "00000000604", "12345678909"];

#[test]
fn test_documented_examples() {
    assert_eq!(validate("11144477735"), ValidationOutcome::Valid);
    assert_eq!(validate("111.444.777-35"), ValidationOutcome::Valid);
    assert_eq!(
        validate("11111111111"),
        ValidationOutcome::Invalid(InvalidReason::RepeatedDigitSequence)
    );
    assert_eq!(
        validate("1234"),
        ValidationOutcome::Invalid(InvalidReason::IncompleteInput)
    );
    assert_eq!(
        validate("11144477736"),
        ValidationOutcome::Invalid(InvalidReason::ChecksumMismatch)
    );
}

#[test]
fn test_known_valid_numbers() {
    for cpf in VALID_CPFS {
        assert_eq!(validate(cpf), ValidationOutcome::Valid, "{}", cpf);
    }
}

#[test]
fn test_validate_is_total_over_odd_inputs() {
    let inputs = [
        "",
        " ",
        "-",
        "...---",
        "abcdefghijk",
        "１１１４４４７７７３５", // fullwidth digits are not ASCII
        "💥11144477735",
        "11144477735💥",
        "\0\0\0",
        "99999999999999999999999999999999",
        "0",
    ];

    for input in inputs {
        let outcome = validate(input);
        // exactly one of the outcomes, and stable across calls
        assert_eq!(outcome, validate(input), "{:?}", input);
    }

    assert_eq!(validate("💥11144477735"), ValidationOutcome::Valid);
    assert_eq!(
        validate("１１１４４４７７７３５"),
        ValidationOutcome::Invalid(InvalidReason::IncompleteInput)
    );
}

#[test]
fn test_punctuation_variants_validate_like_normalized_digits() {
    let variants = [
        "111.444.777-35",
        "111444777-35",
        "111 444 777 35",
        "111/444/777/35",
        "(111) 444-777.35",
        "111.444.777-36",
        "111.111.111-11",
        "111.444",
    ];

    for variant in variants {
        let normalized = normalize(variant);
        assert_eq!(
            validate(variant),
            validate(normalized.as_str()),
            "{}",
            variant
        );
    }
}

#[test]
fn test_altered_check_digits_are_rejected() {
    for cpf in VALID_CPFS {
        let digits: Vec<char> = cpf.chars().collect();
        for position in [9, 10] {
            for replacement in '0'..='9' {
                if replacement == digits[position] {
                    continue;
                }
                let mut altered = digits.clone();
                altered[position] = replacement;
                let altered: String = altered.into_iter().collect();

                assert_eq!(
                    validate(&altered),
                    ValidationOutcome::Invalid(InvalidReason::ChecksumMismatch),
                    "{} -> {}",
                    cpf,
                    altered
                );
            }
        }
    }
}

#[test]
fn test_mask_never_ends_with_separator() {
    let digits = "11144477735";
    for len in 0..=digits.len() {
        let prefix = &digits[..len];
        let masked = mask(prefix);

        assert!(!masked.ends_with('.') && !masked.ends_with('-'), "{:?}", masked);
        assert_eq!(normalize(&masked).as_str(), prefix);
    }

    assert_eq!(mask(digits), "111.444.777-35");
}

#[test]
fn test_mask_output_validates_like_input() {
    for cpf in VALID_CPFS {
        assert_eq!(validate(&mask(cpf)), ValidationOutcome::Valid);
    }
}

#[test]
fn test_complete_matches_known_numbers() {
    for cpf in VALID_CPFS {
        let completed = complete(&cpf[..9]).unwrap();
        assert_eq!(completed.digits(), cpf);
    }
}

#[test]
fn test_cpf_newtype_in_json_payload() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Customer {
        name: String,
        cpf: Cpf,
    }

    let payload = r#"{"name": "Ana", "cpf": "52998224725"}"#;
    let customer: Customer = serde_json::from_str(payload).unwrap();
    assert_eq!(customer.cpf.masked(), "529.982.247-25");

    let encoded = serde_json::to_value(&customer).unwrap();
    assert_eq!(encoded["cpf"], "529.982.247-25");

    let bad = r#"{"name": "Bob", "cpf": "529.982.247-26"}"#;
    let err = serde_json::from_str::<Customer>(bad).err().unwrap();
    assert!(err.to_string().contains("check digits"));
}
