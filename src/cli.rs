use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config;

const AFTER_HELP: &str = r#"The JSON file can contain one or more requests, keyed by a free-form name:

   {
        "request_with_a_given_name": {
            "id": 1,
            "method": "bdev_get_bdevs"
        },
        "request_with_another_name": {
            "jsonrpc": "2.0",
            "id": 1,
            "method": "nvmf_create_subsystem",
            "params": {
                "nqn": "nqn.2020-11.io.spdk:cnode1",
                "allow_any_host": true,
                "serial_number": "SKENRO4VDB8X"
            }
        }
    }

Requests are sent one by one, in file order. Entries without a "method" are skipped."#;

#[derive(Parser, Debug)]
#[command(name = "spdk_rpc_send", version)]
#[command(about = "Simply send a request to an SPDK JSON RPC server.", long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// URL of the SPDK JSON RPC server
    #[arg(long, value_name = "location", default_value = config::server::DEFAULT_HOST)]
    pub url: String,

    /// Port of the SPDK JSON RPC server
    #[arg(long, default_value = config::server::DEFAULT_PORT)]
    pub port: String,

    /// The username
    #[arg(short, long, value_name = "username", default_value = config::server::DEFAULT_USER)]
    pub user: String,

    /// The password
    #[arg(short, long, value_name = "password", default_value = config::server::DEFAULT_PASSWORD)]
    pub passwd: String,

    /// Talk to the server over https instead of http
    #[arg(long)]
    pub https: bool,

    /// Accept invalid or self-signed TLS certificates (trusted local endpoints only)
    #[arg(long)]
    pub insecure: bool,

    /// Exit with the code of the first failed request instead of 0
    #[arg(long)]
    pub strict: bool,

    /// Also write rotating log files into this directory
    #[arg(long, value_name = "dir")]
    pub log_dir: Option<PathBuf>,

    /// JSON file that contains the request
    pub jsonfile: PathBuf,
}

/// Everything the dispatcher needs to reach the server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub user: String,
    pub password: String,
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        let scheme = if self.https { "https" } else { "http" };
        ClientConfig {
            endpoint: format!("{scheme}://{}:{}", self.url, self.port),
            user: self.user.clone(),
            password: self.passwd.clone(),
            accept_invalid_certs: self.insecure,
            timeout: Duration::from_secs(config::server::REQUEST_TIMEOUT_SECS),
        }
    }

    /// The "Parameters are:" block shown with `--verbose`.
    pub fn describe(&self) -> String {
        let cfg = self.client_config();
        let mut s = String::from("Parameters are:\n");
        s.push_str(&format!("  url      : {}\n", cfg.endpoint));
        s.push_str(&format!("  user     : {}\n", cfg.user));
        s.push_str(&format!("  password : {}\n", cfg.password));
        s.push_str(&format!("  JSON file: {}\n", self.jsonfile.display()));
        if cfg.accept_invalid_certs {
            s.push_str("  TLS      : certificate validation disabled\n");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["spdk_rpc_send", "reqs.json"]).unwrap();
        assert!(!args.verbose);
        assert!(!args.strict);
        let cfg = args.client_config();
        assert_eq!(cfg.endpoint, "http://localhost:8000");
        assert_eq!(cfg.user, "admin");
        assert_eq!(cfg.password, "admin");
        assert!(!cfg.accept_invalid_certs);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(args.jsonfile, PathBuf::from("reqs.json"));
    }

    #[test]
    fn test_short_and_long_flags() {
        let args = Args::try_parse_from([
            "spdk_rpc_send", "-v", "--url", "10.0.0.5", "--port", "9009", "-u", "root", "-p", "s3cret", "r.json",
        ])
        .unwrap();
        assert!(args.verbose);
        let cfg = args.client_config();
        assert_eq!(cfg.endpoint, "http://10.0.0.5:9009");
        assert_eq!(cfg.user, "root");
        assert_eq!(cfg.password, "s3cret");
    }

    #[test]
    fn test_https_and_insecure() {
        let args = Args::try_parse_from(["spdk_rpc_send", "--https", "--insecure", "r.json"]).unwrap();
        let cfg = args.client_config();
        assert_eq!(cfg.endpoint, "https://localhost:8000");
        assert!(cfg.accept_invalid_certs);
        assert!(args.describe().contains("certificate validation disabled"));
    }

    #[test]
    fn test_jsonfile_is_required() {
        assert!(Args::try_parse_from(["spdk_rpc_send"]).is_err());
    }

    #[test]
    fn test_describe_lists_parameters() {
        let args = Args::try_parse_from(["spdk_rpc_send", "r.json"]).unwrap();
        let text = args.describe();
        assert!(text.starts_with("Parameters are:\n"));
        assert!(text.contains("  url      : http://localhost:8000"));
        assert!(text.contains("  user     : admin"));
        assert!(text.contains("  JSON file: r.json"));
    }
}
