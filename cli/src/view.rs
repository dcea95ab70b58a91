//! Plain-text rendering of `ClientState`.

use todolist_core::{BannerKind, ClientState, EditState, ListStatus};

pub const EMPTY_LIST: &str = "No todos found. Add your first todo above!";

pub fn render(state: &ClientState) -> String {
    let mut lines = vec!["Todo List".to_string(), "=========".to_string()];

    if let Some(banner) = state.banner() {
        lines.push(match banner.kind {
            BannerKind::Success => format!("[ok] {}", banner.message),
            BannerKind::Error => format!("[error] {}  (type `retry` to reload)", banner.message),
        });
    }

    let mut add = format!("Add Todo: {}", state.draft());
    if state.activity().creating {
        add.push_str("  (adding...)");
    }
    lines.push(add);
    lines.push(String::new());

    match state.list_status() {
        ListStatus::Loading => lines.push("Loading todos...".to_string()),
        ListStatus::Failed => {
            lines.push("Unable to load todos".to_string());
            lines.push("Type `retry` to try again.".to_string());
        }
        ListStatus::Loaded if state.items().is_empty() => lines.push(EMPTY_LIST.to_string()),
        ListStatus::Loaded => {
            for (index, item) in state.items().iter().enumerate() {
                let number = index + 1;
                let row = match state.editing() {
                    EditState::Editing { id, text } if *id == item.id => {
                        let saving = if state.activity().updating { "  (saving...)" } else { "" };
                        format!("{number}. > {text}{saving}  [save | cancel]")
                    }
                    _ if state.activity().deleting.as_ref() == Some(&item.id) => {
                        format!("{number}. {}  (deleting...)", item.text)
                    }
                    _ => format!("{number}. {}", item.text),
                };
                lines.push(row);
            }
        }
    }

    lines.join("\n")
}
