//! Keyboard layout engine: choice rows, navigation row and page indicator.

use chooser_core::ChooserConfig;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::page::{page_number, page_window};
use super::token::ActionTag;

/// Render the control grid for the page starting at `current_index`.
///
/// Layout, top to bottom:
/// - the visible options, `row_width` buttons per row,
/// - a navigation row holding only the controls that apply
///   (multi-back, back, cancel, forward, multi-forward),
/// - a page-indicator row whose button starts typed page entry
///   (omitted when `page_button` is disabled).
///
/// Pure: identical inputs always produce identical grids.
pub fn render_keyboard(
    config: &ChooserConfig,
    current_index: usize,
    options: &[String],
    page_size: usize,
) -> Vec<Component> {
    let tags = &config.tags;
    let page_size = page_size.max(1);
    let (start, end) = page_window(options.len(), page_size, current_index);

    let choice_buttons: Vec<Component> = options[start..end]
        .iter()
        .enumerate()
        .map(|(position, option)| {
            button(
                option.clone(),
                ActionTag::Choose(start + position).encode(tags),
                ButtonStyle::Primary,
            )
        })
        .collect();

    let mut rows: Vec<Component> = choice_buttons
        .chunks(config.row_width.max(1))
        .map(|chunk| action_row(chunk.to_vec()))
        .collect();

    let multi_step = page_size.saturating_mul(config.multi_skip_pages);
    let mut nav = Vec::with_capacity(5);

    if let Some(label) = &config.multi_prev_label
        && let Some(target) = current_index.checked_sub(multi_step)
    {
        nav.push(button(
            label.clone(),
            ActionTag::Prev(target).encode(tags),
            ButtonStyle::Secondary,
        ));
    }

    if let Some(target) = current_index.checked_sub(page_size) {
        nav.push(button(
            config.prev_label.clone(),
            ActionTag::Prev(target).encode(tags),
            ButtonStyle::Secondary,
        ));
    }

    nav.push(button(
        config.cancel_label.clone(),
        ActionTag::Cancel.encode(tags),
        ButtonStyle::Danger,
    ));

    let next_target = current_index.saturating_add(page_size);
    if options.len() > next_target {
        nav.push(button(
            config.next_label.clone(),
            ActionTag::Next(next_target).encode(tags),
            ButtonStyle::Secondary,
        ));
    }

    if let Some(label) = &config.multi_next_label {
        let target = current_index.saturating_add(multi_step);
        if options.len() > target {
            nav.push(button(
                label.clone(),
                ActionTag::Next(target).encode(tags),
                ButtonStyle::Secondary,
            ));
        }
    }

    rows.push(action_row(nav));

    if config.page_button {
        rows.push(action_row(vec![button(
            page_number(current_index, page_size).to_string(),
            ActionTag::PageEntry.encode(tags),
            ButtonStyle::Secondary,
        )]));
    }

    rows
}

fn button(label: String, custom_id: String, style: ButtonStyle) -> Component {
    Component::Button(Button {
        id: None,
        custom_id: Some(custom_id),
        disabled: false,
        emoji: None,
        label: Some(label),
        style,
        url: None,
        sku_id: None,
    })
}

fn action_row(components: Vec<Component>) -> Component {
    Component::ActionRow(ActionRow {
        id: None,
        components,
    })
}

#[cfg(test)]
mod tests {
    use chooser_core::TagSet;

    use super::*;
    use crate::pagination::token::parse_action_tag;

    type Row = Vec<(String, ActionTag)>;

    fn rows(grid: &[Component], tags: &TagSet) -> Vec<Row> {
        grid.iter()
            .map(|component| {
                let Component::ActionRow(row) = component else {
                    panic!("top-level component is not an action row");
                };
                row.components
                    .iter()
                    .map(|nested| {
                        let Component::Button(button) = nested else {
                            panic!("row contains a non-button component");
                        };
                        let custom_id = button.custom_id.as_deref().expect("custom id");
                        (
                            button.label.clone().expect("label"),
                            parse_action_tag(custom_id, tags).expect("chooser tag"),
                        )
                    })
                    .collect()
            })
            .collect()
    }

    fn actions(row: &Row) -> Vec<ActionTag> {
        row.iter().map(|(_, action)| *action).collect()
    }

    fn labels(row: &Row) -> Vec<&str> {
        row.iter().map(|(label, _)| label.as_str()).collect()
    }

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    fn config_with_width(row_width: usize) -> ChooserConfig {
        ChooserConfig {
            row_width,
            ..ChooserConfig::default()
        }
    }

    #[test]
    fn walks_five_items_two_per_page() {
        let config = config_with_width(3);
        let options = items(&["a", "b", "c", "d", "e"]);

        let page = rows(&render_keyboard(&config, 0, &options, 2), &config.tags);
        assert_eq!(page.len(), 3);
        assert_eq!(labels(&page[0]), ["a", "b"]);
        assert_eq!(actions(&page[1]), [ActionTag::Cancel, ActionTag::Next(2)]);
        assert_eq!(labels(&page[2]), ["1"]);
        assert_eq!(actions(&page[2]), [ActionTag::PageEntry]);

        let page = rows(&render_keyboard(&config, 2, &options, 2), &config.tags);
        assert_eq!(labels(&page[0]), ["c", "d"]);
        assert_eq!(
            actions(&page[0]),
            [ActionTag::Choose(2), ActionTag::Choose(3)]
        );
        assert_eq!(
            actions(&page[1]),
            [ActionTag::Prev(0), ActionTag::Cancel, ActionTag::Next(4)]
        );
        assert_eq!(labels(&page[2]), ["2"]);

        let page = rows(&render_keyboard(&config, 4, &options, 2), &config.tags);
        assert_eq!(labels(&page[0]), ["e"]);
        assert_eq!(actions(&page[1]), [ActionTag::Prev(2), ActionTag::Cancel]);
        assert_eq!(labels(&page[2]), ["3"]);
    }

    #[test]
    fn choice_rows_respect_row_width_and_window_size() {
        let options: Vec<String> = (0..23).map(|index| format!("item {index}")).collect();

        for row_width in 1..=5 {
            let config = config_with_width(row_width);
            for page_size in 1..=8 {
                let mut offset = 0;
                while offset < options.len() {
                    let grid = rows(
                        &render_keyboard(&config, offset, &options, page_size),
                        &config.tags,
                    );
                    let choice_rows = &grid[..grid.len() - 2];

                    assert!(choice_rows.iter().all(|row| row.len() <= row_width));
                    let shown: usize = choice_rows.iter().map(Vec::len).sum();
                    assert_eq!(shown, page_size.min(options.len() - offset));

                    offset += page_size;
                }
            }
        }
    }

    #[test]
    fn prev_and_next_targets_are_one_page_apart() {
        let config = ChooserConfig::default();
        let options: Vec<String> = (0..20).map(|index| index.to_string()).collect();
        let page_size = 4;

        for offset in (0..options.len()).step_by(page_size) {
            let grid = rows(
                &render_keyboard(&config, offset, &options, page_size),
                &config.tags,
            );
            let nav = actions(&grid[grid.len() - 2]);

            let has_prev = nav.contains(&ActionTag::Prev(offset.wrapping_sub(page_size)));
            assert_eq!(has_prev, offset >= page_size);

            let has_next = nav.contains(&ActionTag::Next(offset + page_size));
            assert_eq!(has_next, options.len() > offset + page_size);
        }
    }

    #[test]
    fn multi_skip_controls_appear_only_with_labels_and_room() {
        let config = ChooserConfig {
            multi_prev_label: Some("⏪".to_owned()),
            multi_next_label: Some("⏩".to_owned()),
            multi_skip_pages: 2,
            ..ChooserConfig::default()
        };
        let options: Vec<String> = (0..10).map(|index| index.to_string()).collect();

        let grid = rows(&render_keyboard(&config, 0, &options, 2), &config.tags);
        assert_eq!(
            actions(&grid[grid.len() - 2]),
            [ActionTag::Cancel, ActionTag::Next(2), ActionTag::Next(4)]
        );

        let grid = rows(&render_keyboard(&config, 4, &options, 2), &config.tags);
        let nav = &grid[grid.len() - 2];
        assert_eq!(labels(nav), ["⏪", "⬅️", "❌", "➡️", "⏩"]);
        assert_eq!(
            actions(nav),
            [
                ActionTag::Prev(0),
                ActionTag::Prev(2),
                ActionTag::Cancel,
                ActionTag::Next(6),
                ActionTag::Next(8),
            ]
        );

        let grid = rows(&render_keyboard(&config, 6, &options, 2), &config.tags);
        assert_eq!(
            actions(&grid[grid.len() - 2]),
            [
                ActionTag::Prev(2),
                ActionTag::Prev(4),
                ActionTag::Cancel,
                ActionTag::Next(8),
            ]
        );

        let without_labels = ChooserConfig {
            multi_skip_pages: 2,
            ..ChooserConfig::default()
        };
        let grid = rows(
            &render_keyboard(&without_labels, 4, &options, 2),
            &without_labels.tags,
        );
        assert_eq!(
            actions(&grid[grid.len() - 2]),
            [ActionTag::Prev(2), ActionTag::Cancel, ActionTag::Next(6)]
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = ChooserConfig::default();
        let options = items(&["x", "y", "z", "w"]);
        assert_eq!(
            render_keyboard(&config, 2, &options, 2),
            render_keyboard(&config, 2, &options, 2)
        );
    }

    #[test]
    fn page_row_can_be_disabled() {
        let config = ChooserConfig {
            page_button: false,
            ..ChooserConfig::default()
        };
        let options = items(&["a", "b"]);
        let grid = rows(&render_keyboard(&config, 0, &options, 6), &config.tags);
        assert_eq!(grid.len(), 2);
        assert_eq!(actions(&grid[1]), [ActionTag::Cancel]);
    }

    #[test]
    fn empty_list_renders_navigation_only() {
        let config = ChooserConfig::default();
        let grid = rows(&render_keyboard(&config, 0, &[], 3), &config.tags);
        assert_eq!(grid.len(), 2);
        assert_eq!(actions(&grid[0]), [ActionTag::Cancel]);
        assert_eq!(labels(&grid[1]), ["1"]);
    }

    #[test]
    fn duplicate_option_texts_get_distinct_tags() {
        let config = ChooserConfig::default();
        let options = items(&["same", "same", "chs:cancel"]);
        let grid = rows(&render_keyboard(&config, 0, &options, 3), &config.tags);
        assert_eq!(
            actions(&grid[0]),
            [
                ActionTag::Choose(0),
                ActionTag::Choose(1),
                ActionTag::Choose(2)
            ]
        );
    }
}
