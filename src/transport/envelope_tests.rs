//! Tests for envelope decoding and response classification.

use http::StatusCode;

use super::mock::response;
use super::{GatewayError, RejectionKind, ResponseEnvelope, classify};

mod success_criterion {
    use super::*;

    #[test]
    fn only_http_200_with_code_200_succeeds() {
        let cases = [
            (200, 200, true),
            (200, 400, false),
            (400, 200, false),
            (500, 503, false),
        ];

        for (status, code, should_succeed) in cases {
            let body = format!(r#"{{"code":{code},"message":"m","url":"u"}}"#);
            let result = classify(response(status, &body));

            assert_eq!(
                result.is_ok(),
                should_succeed,
                "HTTP {status} / code {code}"
            );
        }
    }

    #[test]
    fn http_status_is_checked_before_business_code() {
        let result = classify(response(401, r#"{"code":401,"message":"bad token"}"#));

        let Err(GatewayError::Api(err)) = result else {
            panic!("expected API error");
        };
        assert_eq!(err.kind, RejectionKind::HttpStatus);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), 401);
    }

    #[test]
    fn business_code_error_on_http_200() {
        let result = classify(response(200, r#"{"code":409,"message":"duplicate order"}"#));

        let Err(GatewayError::Api(err)) = result else {
            panic!("expected API error");
        };
        assert_eq!(err.kind, RejectionKind::BusinessCode);
        assert_eq!(err.status, StatusCode::OK);
        assert_eq!(err.code(), 409);
        assert_eq!(err.message(), "duplicate order");
    }

    #[test]
    fn success_returns_envelope() {
        let envelope = classify(response(
            200,
            r#"{"code":200,"message":"ok","url":"https://pay.example/p/1"}"#,
        ))
        .unwrap();

        assert_eq!(
            envelope,
            ResponseEnvelope {
                code: 200,
                message: "ok".to_string(),
                url: "https://pay.example/p/1".to_string(),
            }
        );
    }
}

mod error_preservation {
    use super::*;

    #[test]
    fn rejected_envelope_keeps_server_message_and_url() {
        let body = r#"{"code":422,"message":"Сумма меньше минимальной","url":"https://pay.example/err?id=7&x=1"}"#;
        let err = classify(response(422, body)).unwrap_err();

        let envelope = err.envelope().expect("envelope is preserved");
        assert_eq!(envelope.message, "Сумма меньше минимальной");
        assert_eq!(envelope.url, "https://pay.example/err?id=7&x=1");
    }

    #[test]
    fn display_reports_status_code_and_message() {
        let err = classify(response(400, r#"{"code":12,"message":"bad amount"}"#)).unwrap_err();

        assert_eq!(err.to_string(), "API error (HTTP 400, code 12): bad amount");
    }

    #[test]
    fn non_json_body_is_decode_error_with_raw_body() {
        let err = classify(response(502, "<html>Bad Gateway</html>")).unwrap_err();

        let GatewayError::Decode { status, body, .. } = &err else {
            panic!("expected decode error, got {err:?}");
        };
        assert_eq!(*status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, "<html>Bad Gateway</html>");
        assert!(err.to_string().contains("<html>Bad Gateway</html>"));
        assert!(err.envelope().is_none());
    }

    #[test]
    fn empty_body_is_decode_error_even_on_200() {
        let err = classify(response(200, "")).unwrap_err();

        assert!(matches!(err, GatewayError::Decode { .. }));
    }
}

mod envelope_decoding {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let envelope: ResponseEnvelope = serde_json::from_str("{}").unwrap();

        assert_eq!(envelope, ResponseEnvelope::default());
        assert!(!envelope.is_accepted());
    }

    #[test]
    fn empty_object_on_200_is_business_error() {
        let err = classify(response(200, "{}")).unwrap_err();

        let GatewayError::Api(api) = err else {
            panic!("expected API error");
        };
        assert_eq!(api.kind, RejectionKind::BusinessCode);
        assert_eq!(api.code(), 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"code":200,"message":"","url":"","extra":true}"#).unwrap();

        assert!(envelope.is_accepted());
    }
}
