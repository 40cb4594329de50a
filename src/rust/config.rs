use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::models::BuiltinModel;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Directory holding tfidfvect.json and the model artifacts
    #[arg(long, env = "NEWSCLASS_ARTIFACTS")]
    pub artifacts_dir: Option<PathBuf>,

    /// Directory served under /assets (logo, homepage image, video)
    #[arg(long, env = "NEWSCLASS_ASSETS", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Raw training data, summarized on the Information page
    #[arg(long, env = "NEWSCLASS_DATASET", default_value = "artifacts/train.csv")]
    pub dataset: PathBuf,

    /// Column of the dataset holding the category label
    #[arg(long, default_value = "category")]
    pub label_column: String,

    /// Address the web server listens on
    #[arg(long, env = "NEWSCLASS_BIND", default_value = "0.0.0.0:8501")]
    pub bind: SocketAddr,

    /// Model preselected on the Prediction page
    #[arg(long, env = "NEWSCLASS_DEFAULT_MODEL", value_parser = parse_model)]
    pub default_model: Option<BuiltinModel>,

    /// Check artifact hashes against manifest.json before loading
    #[arg(long)]
    pub verify: bool,
}

fn parse_model(s: &str) -> Result<BuiltinModel, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["newsclass"]).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.label_column, "category");
        assert_eq!(config.bind.port(), 8501);
        assert!(!config.verify);
    }

    #[test]
    fn test_default_model_flag() {
        let config =
            AppConfig::try_parse_from(["newsclass", "--default-model", "linear_svc", "--verify"]).unwrap();
        assert_eq!(config.default_model, Some(BuiltinModel::LinearSvc));
        assert!(config.verify);

        assert!(AppConfig::try_parse_from(["newsclass", "--default-model", "gpt"]).is_err());
    }
}
