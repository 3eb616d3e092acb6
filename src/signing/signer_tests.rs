//! Tests for token derivation.

use super::{Credentials, Signer, SigningInput, sign};

const SECRET: &str = "s3cr3t";
const TERMINAL: &str = "T1";

fn signer() -> Signer {
    Signer::new(Credentials::new(TERMINAL, SECRET))
}

mod sign_fn {
    use super::*;

    #[test]
    fn matches_pinned_payment_token() {
        let token = sign(SECRET, TERMINAL, "T1ORDER123100.00https://cb");

        assert_eq!(
            token.as_str(),
            "a51d65b2a094cba5079c7a1edb18f361e90a271049a27f3a17ec8ea4f4bbe10f"
        );
    }

    #[test]
    fn is_deterministic() {
        let first = sign(SECRET, TERMINAL, "T1ORDER123100.00https://cb");
        let second = sign(SECRET, TERMINAL, "T1ORDER123100.00https://cb");

        assert_eq!(first, second);
    }

    #[test]
    fn output_is_lowercase_hex_of_fixed_length() {
        let token = sign(SECRET, TERMINAL, "anything");

        assert_eq!(token.as_str().len(), 64);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn empty_input_still_produces_token() {
        let token = sign(SECRET, TERMINAL, "");

        assert_eq!(
            token.as_str(),
            "c44fcfe84881f04972773e8d3da913077f0760dfe15b9ed579649c1abf698752"
        );
    }

    #[test]
    fn single_byte_mutations_change_token() {
        let base = sign(SECRET, TERMINAL, "T1ORDER123100.00https://cb");

        let mutations = [
            sign("s3cr3T", TERMINAL, "T1ORDER123100.00https://cb"),
            sign(SECRET, "T2", "T1ORDER123100.00https://cb"),
            sign(SECRET, TERMINAL, "T1ORDER124100.00https://cb"),
            sign(SECRET, TERMINAL, "T1ORDER123100.01https://cb"),
            sign(SECRET, TERMINAL, "T1ORDER123100.00https://cB"),
        ];

        for mutated in mutations {
            assert_ne!(mutated, base);
        }
    }

    #[test]
    fn swapping_secret_and_terminal_changes_token() {
        let normal = sign(SECRET, TERMINAL, "payload");
        let swapped = sign(TERMINAL, SECRET, "payload");

        assert_ne!(normal, swapped);
    }
}

mod signer {
    use super::*;

    #[test]
    fn payment_formula_is_pinned() {
        let token = signer().sign(&SigningInput::Payment {
            order_id: "ORDER123",
            amount: "100.00",
            callback_url: "https://cb",
        });

        assert_eq!(
            token.as_str(),
            "a51d65b2a094cba5079c7a1edb18f361e90a271049a27f3a17ec8ea4f4bbe10f"
        );
    }

    #[test]
    fn marketplace_payment_formula_is_pinned() {
        let token = signer().sign(&SigningInput::MarketplacePayment {
            order_id: "ORDER123",
            amount: "100.00",
            callback_url: "https://cb",
        });

        assert_eq!(
            token.as_str(),
            "a51d65b2a094cba5079c7a1edb18f361e90a271049a27f3a17ec8ea4f4bbe10f"
        );
    }

    #[test]
    fn tokenization_formula_is_pinned() {
        let token = signer().sign(&SigningInput::Tokenization {
            phone: "+992900000000",
            gate: "tokenization_korti_milli",
        });

        assert_eq!(
            token.as_str(),
            "ae0599ef31fbbc83a50e1ad522bf153fd1e6111fafb9df5ee17b5c4861081767"
        );
    }

    #[test]
    fn delivery_confirmation_formula_is_pinned() {
        let token = signer().sign(&SigningInput::DeliveryConfirmation {
            transaction_id: "TXN42",
            amount: "100.00",
        });

        assert_eq!(
            token.as_str(),
            "d53cffb1105df1cbe18c61472c7958ebd1f16df218f975317175ec39c00a8370"
        );
    }

    #[test]
    fn card_delivery_confirmation_formula_is_pinned() {
        let token = signer().sign(&SigningInput::CardDeliveryConfirmation {
            parent_transaction_id: "PARENT7",
        });

        assert_eq!(
            token.as_str(),
            "f847de98617d0416d4cef436528e63a7132ff077b4241c6d6ae9b2247a20cca4"
        );
    }

    #[test]
    fn agrees_with_free_function() {
        let input = SigningInput::DeliveryConfirmation {
            transaction_id: "TXN42",
            amount: "100.00",
        };

        let via_signer = signer().sign(&input);
        let via_fn = sign(SECRET, TERMINAL, &input.canonical(TERMINAL));

        assert_eq!(via_signer, via_fn);
    }

    #[test]
    fn field_order_matters_across_operations() {
        // Same values, different order: payment signs order/amount/url,
        // the reordered fields must not collide with it.
        let payment = signer().sign(&SigningInput::Payment {
            order_id: "ORDER123",
            amount: "100.00",
            callback_url: "https://cb",
        });
        let reordered = signer().sign_fields(&["100.00", "ORDER123", "https://cb"]);

        assert_ne!(payment, reordered);
        assert_eq!(
            reordered.as_str(),
            "dc7759f7e8e8f7a4ac81c7f832430090f1992fd83846c6607c6d91dd28eb3406"
        );
    }

    #[test]
    fn tokenization_and_delivery_with_swapped_values_differ() {
        let tokenization = signer().sign(&SigningInput::Tokenization {
            phone: "ORDER123",
            gate: "100.00",
        });
        let delivery = signer().sign(&SigningInput::DeliveryConfirmation {
            transaction_id: "100.00",
            amount: "ORDER123",
        });

        assert_ne!(tokenization, delivery);
    }

    #[test]
    fn sign_fields_prefixes_terminal_id() {
        let token = signer().sign_fields(&["PARENT7"]);

        assert_eq!(token, sign(SECRET, TERMINAL, "T1PARENT7"));
    }

    #[test]
    fn debug_redacts_secret() {
        let debug = format!("{:?}", signer());

        assert!(debug.contains("T1"));
        assert!(!debug.contains(SECRET));
    }

    #[test]
    fn signer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signer>();
    }
}

mod key_encoding {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    use super::*;

    /// Step two keyed with the lower-case hex of step one instead of its raw bytes.
    fn sign_with_hex_key(secret: &str, terminal_id: &str, input: &str) -> String {
        let mut step_one = Hmac::<Sha256>::new_from_slice(terminal_id.as_bytes()).unwrap();
        step_one.update(secret.as_bytes());
        let hex_key = hex::encode(step_one.finalize().into_bytes());

        let mut step_two = Hmac::<Sha256>::new_from_slice(hex_key.as_bytes()).unwrap();
        step_two.update(input.as_bytes());
        hex::encode(step_two.finalize().into_bytes())
    }

    #[test]
    fn hex_keyed_token_is_pinned() {
        assert_eq!(
            sign_with_hex_key(SECRET, TERMINAL, "T1ORDER123100.00https://cb"),
            "6c2514160149c78f61a5df18c43d4b679999caf3961f129e11b4d80add3ec91a"
        );
    }

    #[test]
    fn raw_key_differs_from_hex_key() {
        let input = "T1ORDER123100.00https://cb";

        assert_ne!(
            sign(SECRET, TERMINAL, input).as_str(),
            sign_with_hex_key(SECRET, TERMINAL, input)
        );
    }
}

mod credentials {
    use super::*;

    #[test]
    fn exposes_terminal_id() {
        let credentials = Credentials::new("T9", "pw");

        assert_eq!(credentials.terminal_id(), "T9");
    }

    #[test]
    fn debug_hides_secret() {
        let credentials = Credentials::new("T9", "very-secret-value");
        let debug = format!("{credentials:?}");

        assert!(debug.contains("redacted"));
        assert!(!debug.contains("very-secret-value"));
    }
}
