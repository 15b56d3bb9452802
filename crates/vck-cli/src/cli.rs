use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use vck_core::FetchPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "version-check",
    about = "Find the branches and release tags that contain a commit or pull request",
    version,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["pull_request", "commit"])
))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Pull request number to look for (a leading `#` is accepted)
    #[arg(short = 'p', long, value_name = "NUMBER")]
    pub pull_request: Option<String>,

    /// Commit hash to look for (abbreviated or full)
    #[arg(short = 'c', long, value_name = "HASH")]
    pub commit: Option<String>,

    /// Only check these branches (repeatable)
    #[arg(short = 'b', long = "branch", value_name = "NAME")]
    pub branches: Vec<String>,

    /// Only check these tags (repeatable)
    #[arg(short = 't', long = "tag", value_name = "NAME")]
    pub tags: Vec<String>,

    /// Search local state without fetching from the remote first
    #[arg(long)]
    pub skip_fetch: bool,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// The clone's .git directory
    #[arg(long, global = true, value_name = "PATH")]
    pub git_dir: Option<PathBuf>,

    /// Remote to fetch from and search
    #[arg(long, global = true, value_name = "NAME")]
    pub remote: Option<String>,

    /// What to do when fetching fails
    #[arg(long, global = true)]
    pub fetch_policy: Option<FetchPolicyArg>,

    /// Config file (TOML)
    #[arg(long, global = true, env = "VERSION_CHECK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchPolicyArg {
    Advisory,
    Required,
}

impl From<FetchPolicyArg> for FetchPolicy {
    fn from(arg: FetchPolicyArg) -> Self {
        match arg {
            FetchPolicyArg::Advisory => FetchPolicy::Advisory,
            FetchPolicyArg::Required => FetchPolicy::Required,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer Slack slash commands over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind_addr`)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Slack app signing secret
    #[arg(long, env = "SLACK_SIGNING_SECRET", hide_env_values = true)]
    pub signing_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["version-check", "-c", "4a6d8b3c"]).unwrap();
        assert_eq!(cli.commit.as_deref(), Some("4a6d8b3c"));
        assert!(cli.pull_request.is_none());
        assert!(cli.command.is_none());
        assert!(!cli.skip_fetch);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_pull_request_with_filters() {
        let cli = Cli::try_parse_from([
            "version-check",
            "--pull-request",
            "43210",
            "-b",
            "2017.7",
            "--branch",
            "develop",
            "-t",
            "v2017.7.2",
            "--skip-fetch",
        ])
        .unwrap();
        assert_eq!(cli.pull_request.as_deref(), Some("43210"));
        assert_eq!(cli.branches, ["2017.7", "develop"]);
        assert_eq!(cli.tags, ["v2017.7.2"]);
        assert!(cli.skip_fetch);
    }

    #[test]
    fn target_is_required() {
        assert!(Cli::try_parse_from(["version-check"]).is_err());
        assert!(Cli::try_parse_from(["version-check", "-b", "develop"]).is_err());
    }

    #[test]
    fn target_is_exclusive() {
        assert!(Cli::try_parse_from(["version-check", "-p", "1", "-c", "abcd"]).is_err());
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::try_parse_from([
            "version-check",
            "-c",
            "abcd",
            "--git-dir",
            "/srv/salt/.git",
            "--remote",
            "upstream",
            "--fetch-policy",
            "required",
            "--format",
            "json",
            "--config",
            "/etc/version-check.toml",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.git_dir, Some(PathBuf::from("/srv/salt/.git")));
        assert_eq!(cli.remote.as_deref(), Some("upstream"));
        assert_eq!(cli.fetch_policy, Some(FetchPolicyArg::Required));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/version-check.toml")));
        assert!(cli.verbose);
    }

    #[test]
    fn fetch_policy_maps_to_core() {
        assert_eq!(FetchPolicy::from(FetchPolicyArg::Advisory), FetchPolicy::Advisory);
        assert_eq!(FetchPolicy::from(FetchPolicyArg::Required), FetchPolicy::Required);
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from([
            "version-check",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--signing-secret",
            "s3cret",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.bind, Some("127.0.0.1:9000".parse().unwrap()));
                assert_eq!(args.signing_secret, "s3cret");
            }
            None => panic!("expected serve"),
        }
    }

    #[test]
    fn serve_accepts_global_repository_flags() {
        let cli = Cli::try_parse_from([
            "version-check",
            "serve",
            "--signing-secret",
            "s3cret",
            "--git-dir",
            "/srv/salt/.git",
        ])
        .unwrap();
        assert_eq!(cli.git_dir, Some(PathBuf::from("/srv/salt/.git")));
    }

    #[test]
    fn search_flags_conflict_with_serve() {
        assert!(Cli::try_parse_from([
            "version-check",
            "-c",
            "abcd",
            "serve",
            "--signing-secret",
            "s3cret",
        ])
        .is_err());
    }
}
