// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Both Hardhat (`artifacts/contracts/Foo.sol/Foo.json`, `"bytecode": "0x.."`) and Foundry
//! (`out/Foo.sol/Foo.json`, `"bytecode": { "object": "0x.." }`) layouts are supported.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    primitives::Bytes,
};
use glob::{glob, Pattern};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    #[error("no artifact named {name} under {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("multiple artifacts named {name}: {}", display_paths(.paths))]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("artifact {0} has no deployable bytecode (abstract contract or interface?)")]
    EmptyBytecode(String),
    #[error("{name} takes {expected} constructor arguments, got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("could not parse constructor argument {param} of {name}: {message}")]
    InvalidArgument {
        name: String,
        param: String,
        message: String,
    },
    #[error("failed to encode constructor arguments: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Bytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

impl Bytecode {
    fn bytes(&self) -> &Bytes {
        match self {
            Self::Hex(bytes) | Self::Object { object: bytes } => bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Artifact {
    #[serde(skip)]
    name: String,
    pub abi: JsonAbi,
    bytecode: Bytecode,
}

impl Artifact {
    /// Finds and loads the artifact for `name` under `dir`.
    pub fn find(dir: impl AsRef<Path>, name: &str) -> Result<Self, ArtifactError> {
        let path = locate(dir.as_ref(), name)?;
        Self::load(path, name)
    }

    pub fn load(path: impl AsRef<Path>, name: &str) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let mut artifact: Self =
            serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.name = name.to_string();
        debug!(@grey, "loaded artifact {name} from {}", path.display());
        Ok(artifact)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        self.bytecode.bytes()
    }

    /// Builds contract creation code: the bytecode followed by the ABI-encoded constructor
    /// arguments.
    pub fn deploy_code(&self, args: &[String]) -> Result<Bytes, ArtifactError> {
        let bytecode = self.bytecode();
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(self.name.clone()));
        }

        let Some(constructor) = self.abi.constructor() else {
            if !args.is_empty() {
                return Err(ArtifactError::ArgumentCount {
                    name: self.name.clone(),
                    expected: 0,
                    got: args.len(),
                });
            }
            return Ok(bytecode.clone());
        };

        if constructor.inputs.len() != args.len() {
            return Err(ArtifactError::ArgumentCount {
                name: self.name.clone(),
                expected: constructor.inputs.len(),
                got: args.len(),
            });
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let invalid = |message: String| ArtifactError::InvalidArgument {
                name: self.name.clone(),
                param: param.to_string(),
                message,
            };
            let ty = param.resolve().map_err(|e| invalid(e.to_string()))?;
            let value = ty.coerce_str(arg).map_err(|e| invalid(e.to_string()))?;
            values.push(value);
        }

        let encoded = constructor.abi_encode_input(&values)?;
        let mut code = bytecode.to_vec();
        code.extend(encoded);
        Ok(code.into())
    }
}

/// Finds `<name>.json` anywhere under `dir`, skipping Hardhat debug files.
fn locate(dir: &Path, name: &str) -> Result<PathBuf, ArtifactError> {
    let pattern = format!(
        "{}/**/{}.json",
        Pattern::escape(&dir.display().to_string()),
        Pattern::escape(name)
    );
    let mut paths = Vec::new();
    for path in glob(&pattern)? {
        paths.push(path?);
    }

    match paths.len() {
        0 => Err(ArtifactError::NotFound {
            name: name.to_string(),
            dir: dir.to_path_buf(),
        }),
        1 => Ok(paths.remove(0)),
        _ => {
            // Prefer the artifact emitted for the source file of the same name
            let source_dir = format!("{name}.sol");
            let mut preferred: Vec<_> = paths
                .iter()
                .filter(|p| {
                    p.parent()
                        .and_then(Path::file_name)
                        .is_some_and(|parent| parent == source_dir.as_str())
                })
                .cloned()
                .collect();
            if preferred.len() == 1 {
                Ok(preferred.remove(0))
            } else {
                Err(ArtifactError::Ambiguous {
                    name: name.to_string(),
                    paths,
                })
            }
        }
    }
}
