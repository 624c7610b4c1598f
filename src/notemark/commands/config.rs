use crate::commands::{CmdMessage, CmdResult, NotemarkPaths};
use crate::config::{ConfigKey, NotemarkConfig};
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(ConfigKey),
    Set(ConfigKey, String),
}

pub fn run(paths: &NotemarkPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = NotemarkConfig::load(&paths.data)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {
            for key in ConfigKey::ALL {
                result.add_message(CmdMessage::info(format!(
                    "{} = {}",
                    key.name(),
                    config.get(key)
                )));
            }
        }
        ConfigAction::ShowKey(key) => {
            result.add_message(CmdMessage::info(format!(
                "{} = {}",
                key.name(),
                config.get(key)
            )));
        }
        ConfigAction::Set(key, value) => {
            config.set(key, &value);
            config.save(&paths.data)?;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key.name(),
                config.get(key)
            )));
        }
    }

    Ok(result.with_config(config))
}
