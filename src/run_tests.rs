//! Tests for the run module.

use std::io::Write;
use std::sync::Mutex;

use http::{HeaderMap, StatusCode};
use tempfile::NamedTempFile;
use url::Url;

use alif_pay::config::Cli;
use alif_pay::signing::Credentials;
use alif_pay::transport::{HttpError, HttpRequest, HttpResponse};

use super::*;

/// Client that answers every request with the same response.
struct StubClient {
    status: StatusCode,
    body: &'static str,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubClient {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn accepting() -> Self {
        Self::new(
            StatusCode::OK,
            r#"{"code":200,"message":"ok","url":"https://pay.example/p/1"}"#,
        )
    }

    fn last_body(&self) -> serde_json::Value {
        let requests = self.requests.lock().unwrap();
        let body = requests.last().unwrap().body.as_deref().unwrap();
        serde_json::from_slice(body).unwrap()
    }

    fn last_url(&self) -> String {
        self.requests.lock().unwrap().last().unwrap().url.to_string()
    }
}

impl HttpClient for StubClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::new(
            self.status,
            HeaderMap::new(),
            self.body.as_bytes().to_vec(),
        ))
    }
}

fn client(stub: StubClient) -> GatewayClient<StubClient> {
    GatewayClient::with_http_client(
        stub,
        Url::parse("https://gw.example").unwrap(),
        Credentials::new("T1", "s3cr3t"),
    )
}

fn command(args: &[&str]) -> Command {
    let mut full_args = vec!["alif-pay"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args).command
}

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

mod gateway_commands {
    use super::*;

    #[tokio::test]
    async fn pay_prints_code_message_and_url() {
        let client = client(StubClient::accepting());
        let cmd = command(&[
            "pay",
            "--order-id",
            "ORDER123",
            "--amount",
            "100.00",
            "--callback-url",
            "https://cb",
            "--return-url",
            "https://ret",
            "--gate",
            "korti_milli",
        ]);

        let output = execute_with(&client, cmd).await.unwrap();

        assert_eq!(output, "200 ok\nhttps://pay.example/p/1");
        let body = client.transport().client().last_body();
        assert_eq!(body["order_id"], "ORDER123");
        assert_eq!(body["gate"], "korti_milli");
        assert_eq!(
            body["token"],
            "a51d65b2a094cba5079c7a1edb18f361e90a271049a27f3a17ec8ea4f4bbe10f"
        );
    }

    #[tokio::test]
    async fn confirm_delivery_posts_to_confirm_endpoint() {
        let client = client(StubClient::new(
            StatusCode::OK,
            r#"{"code":200,"message":"confirmed"}"#,
        ));
        let cmd = command(&[
            "confirm-delivery",
            "--transaction-id",
            "TXN42",
            "--amount",
            "100.00",
        ]);

        let output = execute_with(&client, cmd).await.unwrap();

        assert_eq!(output, "200 confirmed");
        assert_eq!(
            client.transport().client().last_url(),
            "https://gw.example/confirm-delivery"
        );
    }

    #[tokio::test]
    async fn confirm_card_delivery_sends_extras() {
        let client = client(StubClient::accepting());
        let cmd = command(&[
            "confirm-card-delivery",
            "--parent-transaction-id",
            "PARENT7",
            "--extra",
            "TXN1=10.00",
        ]);

        execute_with(&client, cmd).await.unwrap();

        let body = client.transport().client().last_body();
        assert_eq!(body["extra"][0]["transaction_id"], "TXN1");
        assert_eq!(
            body["token"],
            "f847de98617d0416d4cef436528e63a7132ff077b4241c6d6ae9b2247a20cca4"
        );
    }

    #[tokio::test]
    async fn marketplace_reads_request_file() {
        let file = temp_file(
            r#"{
                "order_id": "MP1",
                "amount": "100.00",
                "callback_url": "https://cb",
                "return_url": "https://ret",
                "mpTerminalInfo": [{"terminal_id": "P1", "amount": "100.00", "invoices": []}]
            }"#,
        );
        let client = client(StubClient::accepting());
        let cmd = command(&[
            "marketplace",
            "--gate",
            "vsa",
            "--request",
            file.path().to_str().unwrap(),
        ]);

        execute_with(&client, cmd).await.unwrap();

        let body = client.transport().client().last_body();
        assert_eq!(body["order_id"], "MP1");
        assert_eq!(body["mpTerminalInfo"][0]["terminal_id"], "P1");
    }

    #[tokio::test]
    async fn marketplace_invalid_request_file_is_reported() {
        let file = temp_file("not json");
        let client = client(StubClient::accepting());
        let cmd = command(&[
            "marketplace",
            "--gate",
            "vsa",
            "--request",
            file.path().to_str().unwrap(),
        ]);

        let result = execute_with(&client, cmd).await;

        assert!(matches!(result, Err(RunError::InvalidRequest { .. })));
        assert!(client.transport().client().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_request_is_gateway_error() {
        let client = client(StubClient::new(
            StatusCode::OK,
            r#"{"code":-1,"message":"invalid token"}"#,
        ));
        let cmd = command(&[
            "confirm-delivery",
            "--transaction-id",
            "TXN42",
            "--amount",
            "100.00",
        ]);

        let err = execute_with(&client, cmd).await.unwrap_err();

        assert!(matches!(err, RunError::Gateway(GatewayError::Api(_))));
        assert!(err.to_string().contains("invalid token"));
    }
}

mod local_commands {
    use super::*;

    #[tokio::test]
    async fn sign_prints_token_without_network() {
        let client = client(StubClient::accepting());
        let cmd = command(&["sign", "ORDER123", "100.00", "https://cb"]);

        let output = execute_with(&client, cmd).await.unwrap();

        assert_eq!(
            output,
            "a51d65b2a094cba5079c7a1edb18f361e90a271049a27f3a17ec8ea4f4bbe10f"
        );
        assert!(client.transport().client().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_is_not_a_gateway_command() {
        let client = client(StubClient::accepting());
        let result = execute_with(&client, command(&["init"])).await;

        assert!(matches!(result, Err(RunError::NotAGatewayCommand)));
    }
}

mod classify {
    use super::*;

    #[test]
    fn payment_ok_is_succeeded() {
        let file = temp_file(r#"{"orderId":"ORDER123","status":"ok","amount":100.0}"#);
        let output = classify_file(CallbackKind::Payment, file.path()).unwrap();

        assert_eq!(output, "payment ORDER123: succeeded (status 'ok')");
    }

    #[test]
    fn tokenization_rejection_carries_reason() {
        let file = temp_file(
            r#"{"code":9,"message":"declined","reason_code":"R1","payload":{"orderId":"TOK1"}}"#,
        );
        let output = classify_file(CallbackKind::Tokenization, file.path()).unwrap();

        assert_eq!(output, "tokenization TOK1: rejected (reason R1) (code 9)");
    }

    #[test]
    fn marketplace_lists_sub_transactions() {
        let file = temp_file(
            r#"{
                "orderId": "MP1",
                "status": "ok",
                "sub_transactions": [
                    {"terminal_id": "P1", "transaction_id": "S1", "status": "failed"}
                ]
            }"#,
        );
        let output = classify_file(CallbackKind::Marketplace, file.path()).unwrap();

        assert_eq!(
            output,
            "marketplace MP1: succeeded (status 'ok')\n  P1 S1: failed or canceled (status 'failed')"
        );
    }

    #[test]
    fn unknown_status_is_unrecognized() {
        let file = temp_file(r#"{"orderId":"ORDER123","status":"refunded"}"#);
        let output = classify_file(CallbackKind::Payment, file.path()).unwrap();

        assert!(output.contains("unrecognized"));
    }

    #[test]
    fn undecodable_body_is_callback_error() {
        let file = temp_file("{");
        let result = classify_file(CallbackKind::Payment, file.path());

        assert!(matches!(result, Err(RunError::Callback(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = classify_file(CallbackKind::Payment, Path::new("/nonexistent/body.json"));

        assert!(matches!(result, Err(RunError::ReadFile { .. })));
    }
}

mod run_error {
    use super::*;

    #[test]
    fn not_a_gateway_command_displays_message() {
        assert_eq!(
            RunError::NotAGatewayCommand.to_string(),
            "Command does not use the gateway"
        );
    }

    #[test]
    fn read_file_displays_path() {
        let error = RunError::ReadFile {
            path: PathBuf::from("req.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(error.to_string().contains("req.json"));
    }
}
