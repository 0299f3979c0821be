#![allow(missing_docs)]
use std::ffi::OsString;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{Level, debug, warn};
use zap_api_core::{CallQuery, OperationKind, SPIDER, ZapClient};

const USAGE: &str = "\
Usage: zap-spider [OPTIONS] <OPERATION> [NAME=VALUE ...]
       zap-spider list

Calls an operation of the ZAP spider API and prints its JSON result.

Options:
  -b, --base <URL>       API base URL [env: ZAP_BASE_URL, default: http://zap/JSON/]
  -p, --proxy <URL>      ZAP proxy [env: ZAP_PROXY, default: http://127.0.0.1:8080]
      --no-proxy         Connect to the base URL directly
  -t, --timeout <SECS>   Request timeout in seconds
  -v, --verbose          Log requests and responses
  -h, --help             Print this help
";

fn main() -> Result<()> {
    let args = match CliArgs::parse(pico_args::Arguments::from_env())? {
        Some(args) => args,
        None => {
            std::io::stdout().lock().write_all(USAGE.as_bytes())?;
            return Ok(());
        }
    };

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    debug!(?args, "starting");

    let mut out = std::io::stdout().lock();
    if args.operation == "list" {
        return list_operations(&mut out);
    }

    let client = args.client().context("building ZAP client")?;
    let query = args
        .params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect::<CallQuery>();
    let result = client
        .spider()
        .proxy()
        .call_by_name(&args.operation, &query)
        .with_context(|| format!("calling spider operation '{}'", args.operation))?;

    let text = serde_json::to_string_pretty(&result)?;
    writeln!(out, "{text}")?;
    Ok(())
}

fn list_operations(out: &mut impl Write) -> Result<()> {
    for kind in [OperationKind::View, OperationKind::Action] {
        for operation in SPIDER.operations_of(kind) {
            writeln!(
                out,
                "{:<6} {:<40} params: [{}]  field: {}",
                kind.to_string(),
                operation.name,
                operation.params.join(", "),
                operation.response.key()
            )?;
        }
    }
    Ok(())
}

#[derive(Debug)]
struct CliArgs {
    base_url: Option<String>,
    proxy: Option<String>,
    no_proxy: bool,
    timeout: Option<Duration>,
    verbose: bool,
    operation: String,
    params: Vec<(String, String)>,
}

impl CliArgs {
    /// Returns `None` when help was requested.
    fn parse(mut pargs: pico_args::Arguments) -> Result<Option<Self>> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let base_url = pargs
            .opt_value_from_str(["-b", "--base"])
            .context("parsing base argument")?
            .or_else(|| std::env::var("ZAP_BASE_URL").ok());
        let proxy = pargs
            .opt_value_from_str(["-p", "--proxy"])
            .context("parsing proxy argument")?
            .or_else(|| std::env::var("ZAP_PROXY").ok());
        let no_proxy = pargs.contains("--no-proxy");
        let timeout = pargs
            .opt_value_from_str::<_, u64>(["-t", "--timeout"])
            .context("parsing timeout argument")?
            .map(Duration::from_secs);
        let verbose = pargs.contains(["-v", "--verbose"]);

        let remaining = pargs.finish();
        let Some((operation, params)) = remaining.split_first() else {
            bail!("missing operation\n\n{USAGE}");
        };
        let operation = to_string(operation)?;
        let params = params
            .iter()
            .map(|param| parse_param(&to_string(param)?))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self {
            base_url,
            proxy,
            no_proxy,
            timeout,
            verbose,
            operation,
            params,
        }))
    }

    fn client(&self) -> Result<ZapClient> {
        let mut builder = ZapClient::builder();
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        if self.no_proxy {
            if self.proxy.is_some() {
                warn!("--no-proxy given, ignoring the proxy setting");
            }
            builder = builder.without_proxy();
        } else if let Some(proxy) = &self.proxy {
            builder = builder.with_proxy(proxy);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.with_timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

fn to_string(arg: &OsString) -> Result<String> {
    arg.to_str()
        .map(str::to_string)
        .with_context(|| format!("argument is not valid UTF-8: {arg:?}"))
}

fn parse_param(param: &str) -> Result<(String, String)> {
    match param.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => bail!("invalid parameter '{param}', expected NAME=VALUE"),
    }
}
