use std::{
    any::type_name,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use access_core::{
    config::{AccessConfig, JDBC_PARAM_PREFIX},
    err::{Context, Result},
};
use access_logging::{debug, info};

use crate::{
    ctx::Ctx,
    processor::{
        dir::DirConfigProcessor,
        env::EnvConfigProcessor,
        util::{expression_to_string, parse_expression, process_expression},
        ConfigExprProcessor,
    },
    properties::parse_properties,
};

/// Parses and loads the configuration
pub struct ConfigLoader {
    processors: Vec<Box<dyn ConfigExprProcessor>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Initialises the configuration loader
    pub fn new() -> Self {
        Self {
            processors: Self::default_processors(),
        }
    }

    #[cfg(test)]
    pub fn mock() -> Self {
        Self { processors: vec![] }
    }

    fn default_processors() -> Vec<Box<dyn ConfigExprProcessor>> {
        vec![
            Box::new(EnvConfigProcessor::default()),
            Box::new(DirConfigProcessor::default()),
        ]
    }

    /// Loads the access configuration from the supplied properties file
    pub fn load(&self, path: &Path) -> Result<AccessConfig> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Failed to get full config path of {}", path.display()))?;
        info!("Loading config from path {}", path.display());

        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from file {}", path.display()))?;

        self.load_data(&data, Some(path))
    }

    /// Parses and processes the supplied properties text
    pub fn load_data(&self, data: &str, path: Option<PathBuf>) -> Result<AccessConfig> {
        let props = self.load_properties(data, path)?;

        debug!("Parsing into {}", type_name::<AccessConfig>());
        Self::parse(props)
    }

    /// Parses the properties and interpolates their values
    pub(crate) fn load_properties(
        &self,
        data: &str,
        path: Option<PathBuf>,
    ) -> Result<BTreeMap<String, String>> {
        let ctx = Ctx::new(path);

        parse_properties(data)
            .context("Failed to parse properties")?
            .into_iter()
            .map(|(key, val)| {
                let val = self
                    .process_value(&ctx, &val)
                    .with_context(|| format!("Failed to process config value of \"{}\"", key))?;

                Ok((key, val))
            })
            .collect()
    }

    fn process_value(&self, ctx: &Ctx, val: &str) -> Result<String> {
        // plain values are taken verbatim, backslashes already resolved by the properties parser
        if !val.contains("${") {
            return Ok(val.to_string());
        }

        let exp = parse_expression(val)?;
        let exp = process_expression(exp, &|mut exp| {
            for processor in self.processors.iter() {
                exp = processor.process(ctx, exp).with_context(|| {
                    format!(
                        "Failed to process config value \"{}\" using the {} processor",
                        val,
                        processor.display_name()
                    )
                })?;
            }

            Ok(exp)
        })?;

        Ok(expression_to_string(exp))
    }

    fn parse(props: BTreeMap<String, String>) -> Result<AccessConfig> {
        let params = props
            .iter()
            .filter_map(|(key, val)| {
                key.strip_prefix(JDBC_PARAM_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), val.clone()))
            })
            .collect();

        let mapping = props
            .into_iter()
            .map(|(key, val)| (serde_yaml::Value::String(key), serde_yaml::Value::String(val)))
            .collect::<serde_yaml::Mapping>();

        let mut config: AccessConfig = serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))
            .context("Failed to parse properties into AccessConfig")?;
        config.impala.params = params;

        Ok(config)
    }
}
