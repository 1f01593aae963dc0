use std::fmt::Write;

use fortuna_core::{PanelBody, PanelView};

/// Rende la vista del pannello come testo per il terminale.
pub fn render_view(view: &PanelView) -> String {
    let PanelView::Open { title, participant_count, show_lucky_draw, body } = view else {
        return String::new();
    };

    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "{participant_count} participants");
    let actions = if *show_lucky_draw { "[d] Lucky Draw  [q] Close" } else { "[q] Close" };
    let _ = writeln!(out, "{actions}");
    let _ = writeln!(out);

    match body {
        PanelBody::Loading => {
            let _ = writeln!(out, "Loading participants...");
        }
        PanelBody::Empty => {
            let _ = writeln!(out, "No participants yet");
        }
        PanelBody::Roster(rows) => {
            for row in rows {
                let _ = writeln!(out, "({}) {}  {}", row.avatar, row.name, row.upi);
                let _ = writeln!(out, "    Joined: {}", row.joined);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortuna_core::ParticipantRow;

    fn open(show_lucky_draw: bool, body: PanelBody) -> PanelView {
        PanelView::Open {
            title: "Venerdì".to_string(),
            participant_count: 1,
            show_lucky_draw,
            body,
        }
    }

    #[test]
    fn hidden_renders_nothing() {
        assert!(render_view(&PanelView::Hidden).is_empty());
    }

    #[test]
    fn lucky_draw_action_follows_view() {
        assert!(render_view(&open(true, PanelBody::Empty)).contains("[d] Lucky Draw"));
        assert!(!render_view(&open(false, PanelBody::Empty)).contains("Lucky Draw"));
    }

    #[test]
    fn roster_rows_show_avatar_and_handle() {
        let row = ParticipantRow {
            id: "u1".into(),
            avatar: "A".into(),
            name: "anna".into(),
            upi: "anna@okbank".into(),
            joined_at: "2025-11-02T10:20:30Z".into(),
            joined: "02/11/2025, 10:20:30".into(),
        };
        let text = render_view(&open(true, PanelBody::Roster(vec![row])));
        assert!(text.contains("(A) anna  anna@okbank"));
        assert!(text.contains("Joined: 02/11/2025, 10:20:30"));
        assert!(!text.contains("Loading"));
    }
}
