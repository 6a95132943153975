//! Tests for SourceService: classification order, override precedence, dialects

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use envkey_source::application::services::SourceService;
use envkey_source::domain::{FetchFailure, FetchOptions, FetchOutcome, OutputDialect, RenderOptions};
use envkey_source::infrastructure::traits::{EnvReader, Fetcher};
use envkey_source::util::testing;
use rstest::rstest;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const PAYLOAD: &str = r#"{
    "TEST": "it",
    "TEST_2": "works!",
    "TEST_INJECTION": "'$(uname)",
    "TEST_SINGLE_QUOTES": "this' is ok",
    "TEST_SPACES": "it does work!"
}"#;

/// Fetcher returning a canned outcome and counting calls
struct MockFetcher {
    outcome: FetchOutcome,
    calls: AtomicUsize,
}

impl MockFetcher {
    fn ok(payload: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(payload.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn err(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(FetchFailure::new(message)),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, _credential: &str, _options: &FetchOptions) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Environment backed by a map instead of the real process env
#[derive(Default)]
struct MockEnv(HashMap<String, String>);

impl MockEnv {
    fn with(pairs: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }
}

impl EnvReader for MockEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

fn fetch_options() -> FetchOptions {
    FetchOptions {
        should_cache: false,
        cache_dir: None,
        client_name: "envkey-source".into(),
        client_version: "test".into(),
        verbose: false,
        timeout_seconds: 10.0,
        retries: 3,
        retry_backoff: 1.0,
    }
}

fn render(force: bool, dialect: OutputDialect) -> RenderOptions {
    RenderOptions { force, dialect }
}

fn source(
    fetcher: Arc<MockFetcher>,
    env: Arc<MockEnv>,
    credential: &str,
    opts: RenderOptions,
) -> String {
    let service = SourceService::new(fetcher, env);
    service.source(credential, &fetch_options(), &opts).text
}

#[test]
fn given_valid_payload_when_posix_export_then_sorted_and_escaped() {
    let out = source(
        MockFetcher::ok(PAYLOAD),
        MockEnv::with(&[]),
        "key-123",
        render(true, OutputDialect::PosixExport),
    );

    assert_eq!(
        out,
        "export 'TEST'='it' 'TEST_2'='works!' 'TEST_INJECTION'=''\"'\"'$(uname)' \
         'TEST_SINGLE_QUOTES'='this'\"'\"' is ok' 'TEST_SPACES'='it does work!'"
    );
}

#[test]
fn given_valid_payload_when_pam_compatible_then_one_export_per_line() {
    let out = source(
        MockFetcher::ok(PAYLOAD),
        MockEnv::with(&[]),
        "key-123",
        render(true, OutputDialect::PamCompatible),
    );

    assert_eq!(
        out,
        "export TEST='it'\nexport TEST_2='works!'\nexport TEST_INJECTION=''$(uname)'\n\
         export TEST_SINGLE_QUOTES='this' is ok'\nexport TEST_SPACES='it does work!'"
    );
}

#[test]
fn given_valid_payload_when_dotenv_then_lines_without_export() {
    let out = source(
        MockFetcher::ok(r#"{"TEST_2":"works!","TEST":"it"}"#),
        MockEnv::with(&[]),
        "key-123",
        render(true, OutputDialect::DotEnv),
    );

    assert_eq!(out, "'TEST'='it'\n'TEST_2'='works!'\n");
}

#[test]
fn given_empty_credential_when_sourcing_then_missing_error_without_fetch() {
    let fetcher = MockFetcher::ok(PAYLOAD);
    let service = SourceService::new(fetcher.clone(), MockEnv::with(&[]));

    let out = service.source("", &fetch_options(), &render(false, OutputDialect::PosixExport));

    assert_eq!(out.text, "echo 'error: ENVKEY missing.'; false");
    assert!(out.failed);
    assert_eq!(fetcher.calls(), 0);
}

#[test]
fn given_adapter_failure_when_sourcing_then_message_forwarded() {
    let out = source(
        MockFetcher::err("Could not load from cache."),
        MockEnv::with(&[]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(out, "echo 'error: Could not load from cache.'; false");
}

#[test]
fn given_adapter_failure_with_quote_when_sourcing_then_line_stays_quoted() {
    let out = source(
        MockFetcher::err("can't reach server'; rm -rf ~; echo '"),
        MockEnv::with(&[]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(
        out,
        "echo 'error: can'\"'\"'t reach server'\"'\"'; rm -rf ~; echo '\"'\"''; false"
    );
}

#[test]
fn given_blank_payload_when_sourcing_then_invalid_credential() {
    let out = source(
        MockFetcher::ok(""),
        MockEnv::with(&[]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(out, "echo 'error: ENVKEY invalid.'; false");
}

#[test]
fn given_malformed_payload_when_sourcing_then_parse_error_is_shell_safe() {
    let out = source(
        MockFetcher::ok("<html>502</html>"),
        MockEnv::with(&[]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(
        out,
        "echo 'error: There was a problem parsing EnvKey'\"'\"'s response.'; false"
    );
}

#[rstest]
#[case(OutputDialect::PosixExport)]
#[case(OutputDialect::PamCompatible)]
#[case(OutputDialect::DotEnv)]
fn given_empty_object_when_sourcing_then_informational_success(#[case] dialect: OutputDialect) {
    let service = SourceService::new(MockFetcher::ok("{}"), MockEnv::with(&[]));

    let out = service.source("key-123", &fetch_options(), &render(false, dialect));

    assert_eq!(out.text, "echo 'No vars set'");
    assert!(!out.failed);
}

#[test]
fn given_existing_env_var_when_not_forced_then_existing_value_wins() {
    let out = source(
        MockFetcher::ok(r#"{"FOO":"baz","OTHER":"fetched"}"#),
        MockEnv::with(&[("FOO", "bar")]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(out, "export 'FOO'='bar' 'OTHER'='fetched'");
}

#[test]
fn given_existing_env_var_when_forced_then_fetched_value_wins() {
    let out = source(
        MockFetcher::ok(r#"{"FOO":"baz"}"#),
        MockEnv::with(&[("FOO", "bar")]),
        "key-123",
        render(true, OutputDialect::PosixExport),
    );

    assert_eq!(out, "export 'FOO'='baz'");
}

#[test]
fn given_existing_empty_env_var_when_not_forced_then_fetched_value_wins() {
    let out = source(
        MockFetcher::ok(r#"{"FOO":"baz"}"#),
        MockEnv::with(&[("FOO", "")]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(out, "export 'FOO'='baz'");
}

#[test]
fn given_existing_env_value_with_quote_when_not_forced_then_still_escaped() {
    let out = source(
        MockFetcher::ok(r#"{"FOO":"baz"}"#),
        MockEnv::with(&[("FOO", "it's $(local)")]),
        "key-123",
        render(false, OutputDialect::PosixExport),
    );

    assert_eq!(out, "export 'FOO'='it'\"'\"'s $(local)'");
}

#[test]
fn given_same_inputs_when_sourcing_twice_then_output_identical() {
    let fetcher = MockFetcher::ok(PAYLOAD);
    let service = SourceService::new(fetcher.clone(), MockEnv::with(&[("TEST", "local")]));
    let opts = render(false, OutputDialect::PosixExport);

    let first = service.source("key-123", &fetch_options(), &opts);
    let second = service.source("key-123", &fetch_options(), &opts);

    assert_eq!(first, second);
    assert_eq!(fetcher.calls(), 2);
}
