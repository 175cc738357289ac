use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::process::Command;

/// Snapshot of where the bootstrapper runs and what it can reach
#[derive(Debug, Serialize, Deserialize)]
pub struct Environment {
    pub executable: String,
    pub os: String,
    pub arch: String,
    pub current_dir: String,
    pub tools: BTreeMap<String, ToolInfo>,
    /// `PATH` entries in lookup order
    pub search_path: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolInfo {
    pub available: bool,
    pub version: Option<String>,
    pub path: Option<String>,
}

impl Environment {
    pub fn detect(tools: &[&str]) -> Result<Self> {
        let mut env = Environment {
            executable: env::current_exe()?.display().to_string(),
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            current_dir: env::current_dir()?.display().to_string(),
            tools: BTreeMap::new(),
            search_path: Vec::new(),
        };

        for tool in tools {
            env.tools.insert(tool.to_string(), detect_tool(tool));
        }
        env.collect_search_path();

        Ok(env)
    }

    fn collect_search_path(&mut self) {
        if let Some(path) = env::var_os("PATH") {
            self.search_path = env::split_paths(&path)
                .map(|p| p.display().to_string())
                .collect();
        }
    }

    pub fn missing_tools(&self) -> Vec<&str> {
        self.tools
            .iter()
            .filter(|(_, info)| !info.available)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

fn detect_tool(tool: &str) -> ToolInfo {
    let mut info = ToolInfo {
        available: false,
        version: None,
        path: None,
    };

    if let Ok(path) = which::which(tool) {
        info.available = true;
        info.path = Some(path.display().to_string());

        if let Ok(output) = Command::new(tool).arg("--version").output() {
            let version_str = String::from_utf8_lossy(&output.stdout);
            info.version = version_str.lines().next().map(|l| l.trim().to_string());
        }
    }

    info
}
