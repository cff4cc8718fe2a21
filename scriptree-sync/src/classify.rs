//! Folder assignment for exported scripts.
//!
//! Two modes, chosen once per export:
//!
//! - **Markers**: any `"@ Title"` record in the container switches the whole
//!   run to marker grouping. Each marker opens a folder for the scripts that
//!   follow it; scripts before the first marker land in [`UNSORTED_GROUP`],
//!   and a separator (empty, unnamed record) sends what follows to the
//!   scripts root.
//! - **Fallback**: without markers, scripts with stock engine names are
//!   sorted into fixed folders and everything else into [`CUSTOM_GROUP`].
//!
//! Both modes share one flat folder namespace; a marker titled like a
//! fallback folder is not detected.

use std::collections::HashMap;

use scriptree_core::{FragmentRecord, RecordKind, CATEGORY_PREFIX};

use crate::sanitize::{folder_name, NameSanitizer, ReservedNames};
use crate::tree::{ExportTree, TreeError};

/// Folder for scripts that precede the first category marker.
pub const UNSORTED_GROUP: &str = "-UNSORTED";
/// Fallback folder for scripts with no stock name.
pub const CUSTOM_GROUP: &str = "Custom Scripts";
/// Fallback folder for the entry-point scripts.
pub const MAIN_GROUP: &str = "Main";

const GAME_OBJECTS: &[&str] = &[
    "Game_Temp", "Game_System", "Game_Switches", "Game_Variables", "Game_SelfSwitches",
    "Game_Screen", "Game_Picture", "Game_Battler 1", "Game_Battler 2", "Game_Battler 3",
    "Game_BattleAction", "Game_Actor", "Game_Enemy", "Game_Actors", "Game_Party",
    "Game_Troop", "Game_Map", "Game_CommonEvent", "Game_Character 1", "Game_Character 2",
    "Game_Character 3", "Game_Event", "Game_Player",
];

const SPRITES: &[&str] = &[
    "Sprite_Character", "Sprite_Battler", "Sprite_Picture", "Sprite_Timer",
    "Spriteset_Map", "Spriteset_Battle", "Arrow_Base", "Arrow_Enemy", "Arrow_Actor",
];

const WINDOWS: &[&str] = &[
    "Window_Base", "Window_Selectable", "Window_Command", "Window_Help", "Window_Gold",
    "Window_PlayTime", "Window_Steps", "Window_MenuStatus", "Window_Item", "Window_Skill",
    "Window_SkillStatus", "Window_Target", "Window_EquipLeft", "Window_EquipRight",
    "Window_EquipItem", "Window_Status", "Window_SaveFile", "Window_ShopCommand",
    "Window_ShopBuy", "Window_ShopSell", "Window_ShopNumber", "Window_ShopStatus",
    "Window_NameEdit", "Window_NameInput", "Window_InputNumber", "Window_Message",
    "Window_PartyCommand", "Window_BattleStatus", "Window_BattleResult", "Window_DebugLeft",
    "Window_DebugRight",
];

const SCENES: &[&str] = &[
    "Interpreter 1", "Interpreter 2", "Interpreter 3", "Interpreter 4", "Interpreter 5",
    "Interpreter 6", "Interpreter 7", "Scene_Title", "Scene_Map", "Scene_Menu", "Scene_Item",
    "Scene_Skill", "Scene_Equip", "Scene_Status", "Scene_File", "Scene_Save", "Scene_Load",
    "Scene_End", "Scene_Battle 1", "Scene_Battle 2", "Scene_Battle 3", "Scene_Battle 4",
    "Scene_Shop", "Scene_Name", "Scene_Gameover", "Scene_Debug",
];

const FALLBACK_TABLES: &[(&str, &[&str])] = &[
    ("Base Game Objects", GAME_OBJECTS),
    ("Base Sprites", SPRITES),
    ("Base Windows", WINDOWS),
    ("Base Scenes", SCENES),
];

const MAIN_NAMES: &[&str] = &["Main", "Scripts Loader"];

/// How scripts are assigned to folders in one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    Markers,
    Fallback,
}

/// Markers mode as soon as one record is a category marker.
pub fn detect_mode(records: &[FragmentRecord]) -> GroupingMode {
    let has_marker = records
        .iter()
        .any(|r| matches!(r.kind(), RecordKind::Category(_)));
    if has_marker {
        GroupingMode::Markers
    } else {
        GroupingMode::Fallback
    }
}

/// Fallback folder for a script name.
pub fn fallback_group(name: &str) -> &'static str {
    if MAIN_NAMES.contains(&name) {
        return MAIN_GROUP;
    }
    FALLBACK_TABLES
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map(|(group, _)| *group)
        .unwrap_or(CUSTOM_GROUP)
}

/// Result of classifying a container for export.
#[derive(Debug, Clone)]
pub struct Classified {
    pub mode: GroupingMode,
    pub tree: ExportTree,
    /// Sanitized script name → content, for every exported script.
    pub contents: HashMap<String, String>,
    /// Number of records whose name was changed by sanitizing.
    pub renamed: usize,
}

/// Sort every non-empty script of `records` into an [`ExportTree`].
///
/// Sanitized names, marker titles included, are written back into
/// `records`, so the container can be saved with the names the files and
/// folders were exported under.
pub fn classify(
    records: &mut [FragmentRecord],
    reserved: &ReservedNames,
) -> Result<Classified, TreeError> {
    let mode = detect_mode(records);
    let mut names = NameSanitizer::with_reserved(reserved);
    let mut tree = ExportTree::new();
    let mut contents = HashMap::new();
    let mut renamed = 0;
    let mut current: Option<String> = match mode {
        GroupingMode::Markers => Some(UNSORTED_GROUP.to_string()),
        GroupingMode::Fallback => None,
    };

    for record in records.iter_mut() {
        if mode == GroupingMode::Markers {
            match record.kind() {
                RecordKind::Category(title) => {
                    if !record.content.is_empty() {
                        tracing::warn!(
                            "category marker '{}' has content; markers are not exported",
                            record.name
                        );
                    }
                    let folder = folder_name(title, reserved);
                    let marker = format!("{CATEGORY_PREFIX}{folder}");
                    if marker != record.name {
                        tracing::info!("renamed category '{}' to '{marker}'", record.name);
                        record.name = marker;
                        renamed += 1;
                    }
                    current = Some(folder);
                    continue;
                }
                RecordKind::Separator => {
                    current = None;
                    continue;
                }
                RecordKind::Fragment => {}
            }
        }
        if record.is_empty() {
            tracing::debug!("skipping empty script '{}'", record.name);
            continue;
        }

        let name = names.assign(&record.name);
        if name != record.name {
            tracing::info!("renamed script '{}' to '{}'", record.name, name);
            record.name = name.clone();
            renamed += 1;
        }

        let group = match mode {
            GroupingMode::Markers => current.clone(),
            GroupingMode::Fallback => Some(fallback_group(&name).to_string()),
        };
        match group {
            Some(group) => {
                if !tree.has_branch(&group) {
                    tree.add_branch(&group)?;
                }
                tree.add_item(&name, &group)?;
            }
            None => tree.add_loose_item(&name),
        }
        contents.insert(name, record.content.clone());
    }

    Ok(Classified {
        mode,
        tree,
        contents,
        renamed,
    })
}
