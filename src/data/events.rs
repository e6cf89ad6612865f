use std::collections::HashSet;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rules::checks::CheckKind;
use crate::rules::stats::StatKind;

/// Default location of the narrative event catalog override.
pub const DEFAULT_EVENT_CATALOG_PATH: &str = "./assets/data/events.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub schema_version: u32,
    pub events: Vec<EventDef>,
}

/// A narrative event shown to the player as a choice between options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub title: String,
    pub desc: String,
    pub options: Vec<EventOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOption {
    pub text: String,
    #[serde(default)]
    pub check: CheckKind,
    /// Declared difficulty carried alongside the check. Kept in the data
    /// model even where the resolver does not consult it.
    #[serde(default)]
    pub threshold: Option<i32>,
    pub success: EventOutcome,
    #[serde(default)]
    pub fail: Option<EventOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOutcome {
    #[serde(default)]
    pub stat: Option<StatKind>,
    #[serde(default)]
    pub amount: i32,
    pub msg: String,
}

#[derive(Debug)]
pub enum EventDataError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl std::fmt::Display for EventDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventDataError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            EventDataError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            EventDataError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for EventDataError {}

pub fn load_event_catalog(path: impl AsRef<Path>) -> Result<EventCatalog, EventDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| EventDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog: EventCatalog =
        serde_json::from_str(&raw).map_err(|source| EventDataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}

impl EventCatalog {
    pub fn validate(&self) -> Result<(), EventDataError> {
        let mut titles = HashSet::new();
        for event in &self.events {
            if event.title.trim().is_empty() {
                return Err(EventDataError::Validation(
                    "event title cannot be empty".to_string(),
                ));
            }
            if !titles.insert(event.title.clone()) {
                return Err(EventDataError::Validation(format!(
                    "duplicate event title {}",
                    event.title
                )));
            }
            if event.desc.trim().is_empty() {
                return Err(EventDataError::Validation(format!(
                    "event {} missing description",
                    event.title
                )));
            }
            if event.options.is_empty() {
                return Err(EventDataError::Validation(format!(
                    "event {} has no options",
                    event.title
                )));
            }
        }
        Ok(())
    }
}

/// Resource holding the random-event pool the turn controller draws from.
#[derive(Resource, Debug, Clone)]
pub struct EventLibrary {
    pub catalog: EventCatalog,
}

impl EventLibrary {
    /// Loads the catalog override from disk, falling back to the built-in
    /// pool when the file is absent or invalid.
    pub fn load_default() -> Self {
        match load_event_catalog(DEFAULT_EVENT_CATALOG_PATH) {
            Ok(catalog) => Self { catalog },
            Err(err) => {
                tracing::warn!(
                    "event catalog unavailable ({}), using built-in pool",
                    err
                );
                Self {
                    catalog: builtin_events(),
                }
            }
        }
    }
}

/// The built-in random event pool.
pub fn builtin_events() -> EventCatalog {
    EventCatalog {
        schema_version: 1,
        events: vec![
            EventDef {
                title: "仙人遗迹".to_string(),
                desc: "传闻附近山脉有仙人洞府现世，霞光万丈。".to_string(),
                options: vec![
                    EventOption {
                        text: "冒险一探".to_string(),
                        check: CheckKind::Luck,
                        threshold: Some(20),
                        success: EventOutcome {
                            stat: Some(StatKind::Spirit),
                            amount: 5,
                            msg: "获得上古功法残篇，灵力大增！".to_string(),
                        },
                        fail: Some(EventOutcome {
                            stat: None,
                            amount: 0,
                            msg: "被守护阵法击伤，无功而返。".to_string(),
                        }),
                    },
                    EventOption {
                        text: "不去凑热闹".to_string(),
                        check: CheckKind::None,
                        threshold: None,
                        success: EventOutcome {
                            stat: Some(StatKind::Con),
                            amount: 1,
                            msg: "潜心修炼，心境平和。".to_string(),
                        },
                        fail: None,
                    },
                ],
            },
            EventDef {
                title: "兽潮来袭".to_string(),
                desc: "无数妖兽冲击村落，生灵涂炭。".to_string(),
                options: vec![
                    EventOption {
                        text: "挺身而出".to_string(),
                        check: CheckKind::Combat,
                        threshold: None,
                        success: EventOutcome {
                            stat: Some(StatKind::Root),
                            amount: 3,
                            msg: "斩杀妖兽首领，受凡人供奉，根骨提升。".to_string(),
                        },
                        fail: Some(EventOutcome {
                            stat: None,
                            amount: 0,
                            msg: "妖兽太多，只能勉强自保。".to_string(),
                        }),
                    },
                    EventOption {
                        text: "暂避锋芒".to_string(),
                        check: CheckKind::None,
                        threshold: None,
                        success: EventOutcome {
                            stat: None,
                            amount: 0,
                            msg: "你躲过了兽潮。".to_string(),
                        },
                        fail: None,
                    },
                ],
            },
            EventDef {
                title: "神秘行商".to_string(),
                desc: "遇到一位神秘的云游商人，兜售奇珍异宝。".to_string(),
                options: vec![
                    EventOption {
                        text: "购买丹药".to_string(),
                        check: CheckKind::Luck,
                        threshold: Some(15),
                        success: EventOutcome {
                            stat: Some(StatKind::Con),
                            amount: 3,
                            msg: "丹药药力纯正，体魄增强！".to_string(),
                        },
                        fail: Some(EventOutcome {
                            stat: None,
                            amount: 0,
                            msg: "买到了假药，吃了拉肚子。".to_string(),
                        }),
                    },
                    EventOption {
                        text: "无视".to_string(),
                        check: CheckKind::None,
                        threshold: None,
                        success: EventOutcome {
                            stat: None,
                            amount: 0,
                            msg: "你径直走开了。".to_string(),
                        },
                        fail: None,
                    },
                ],
            },
        ],
    }
}

/// The yearly bottleneck challenge. The threshold mirrors the player's
/// spirit at trigger time; the spirit gate itself rolls against its fixed
/// floor.
pub fn annual_event(current_spirit: i32) -> EventDef {
    EventDef {
        title: "年度瓶颈".to_string(),
        desc: "修仙路漫漫，每年此时心魔易生。".to_string(),
        options: vec![EventOption {
            text: "静心抵抗".to_string(),
            check: CheckKind::Spirit,
            threshold: Some(current_spirit),
            success: EventOutcome {
                stat: Some(StatKind::Spirit),
                amount: 2,
                msg: "战胜心魔，道心更加稳固。".to_string(),
            },
            fail: Some(EventOutcome {
                stat: None,
                amount: 0,
                msg: "心魔难除，修为停滞。".to_string(),
            }),
        }],
    }
}
