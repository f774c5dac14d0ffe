//! End-to-end behaviour of the sheet controller and the export flow, driven
//! through the public API only.

use futures::executor::block_on;
use rstest::rstest;

use ui::core::error::ExportError;
use ui::core::layout::Size;
use ui::core::stats::{Axis, StatVector};
use ui::core::theme::ChartTheme;
use ui::export::{self, Capture, ControlVisibility, ExportRegion};
use ui::sheet::{InitialInputs, SyncController};

fn controller() -> SyncController {
    SyncController::new(ChartTheme::default(), InitialInputs::default()).unwrap()
}

fn open_overlay(sync: &mut SyncController) {
    let ticket = sync.on_view_request();
    sync.on_layout_committed(ticket, Size::new(400.0, 400.0))
        .unwrap();
}

#[test]
fn summary_clamps_while_primary_shows_raw_values() {
    let mut sync = controller();
    for (axis, raw) in Axis::ALL.into_iter().zip(["12", "3", "7", "0", "10"]) {
        sync.on_stat_input(axis, raw).unwrap();
    }
    open_overlay(&mut sync);

    assert_eq!(sync.primary().displayed_values(), &[12.0, 3.0, 7.0, 0.0, 10.0]);
    let summary = sync.summary().expect("summary created");
    assert_eq!(summary.displayed_values(), &[10.0, 3.0, 7.0, 0.0, 10.0]);
}

#[test]
fn primary_color_cascades_to_untouched_axis_pickers() {
    let mut sync = controller();
    sync.on_multi_color_toggle().unwrap();
    sync.on_color_input("#ff0000").unwrap();

    for axis in Axis::ALL {
        assert_eq!(sync.axis_picker(axis), "#ff0000", "{axis:?}");
    }
}

#[test]
fn customized_axis_colors_do_not_follow_primary() {
    let mut sync = controller();
    sync.on_multi_color_toggle().unwrap();
    sync.on_axis_color_input(Axis::Speed, "#123456").unwrap();
    sync.on_color_input("#ff0000").unwrap();

    assert_eq!(sync.axis_picker(Axis::Speed), "#123456");
    assert_eq!(sync.colors().primary(), "#ff0000");
}

#[test]
fn axis_override_survives_multi_color_toggle() {
    let mut sync = controller();
    sync.on_multi_color_toggle().unwrap();
    sync.on_axis_color_input(Axis::Trick, "#00ff00").unwrap();

    sync.on_multi_color_toggle().unwrap();
    assert!(!sync.colors().multi_color());
    sync.on_multi_color_toggle().unwrap();

    assert!(sync.colors().multi_color());
    assert_eq!(sync.axis_picker(Axis::Trick), "#00ff00");
}

#[test]
fn clearing_axis_colors_resets_trick_override() {
    let mut sync = controller();
    sync.on_multi_color_toggle().unwrap();
    sync.on_axis_color_input(Axis::Trick, "#00ff00").unwrap();
    sync.on_clear_axis_colors().unwrap();

    assert_eq!(sync.axis_picker(Axis::Trick), sync.colors().primary());
}

#[test]
fn second_view_request_resizes_instead_of_recreating() {
    let mut sync = controller();
    open_overlay(&mut sync);
    assert_eq!(sync.summary_creations(), 1);
    let resizes = sync.summary().map(|view| view.resize_count()).unwrap();

    let ticket = sync.on_view_request();
    sync.on_layout_committed(ticket, Size::new(380.0, 380.0))
        .unwrap();

    assert_eq!(sync.summary_creations(), 1);
    assert_eq!(
        sync.summary().map(|view| view.resize_count()),
        Some(resizes + 1)
    );
}

#[test]
fn layout_commit_after_close_is_harmless() {
    let mut sync = controller();
    let ticket = sync.on_view_request();
    sync.on_close();
    sync.on_layout_committed(ticket, Size::default()).unwrap();

    assert!(!sync.overlay().visible);
    assert_eq!(sync.summary_creations(), 1);
}

#[test]
fn edits_before_first_view_never_create_summary() {
    let mut sync = controller();
    sync.on_stat_input(Axis::Defense, "9").unwrap();
    sync.on_name_input("Ayla").unwrap();

    assert!(sync.summary().is_none());
    assert_eq!(sync.summary_creations(), 0);
}

#[test]
fn identical_update_leaves_scene_untouched() {
    let mut sync = controller();
    open_overlay(&mut sync);
    let before = sync.summary().map(|view| view.svg()).unwrap();
    let revision = sync.summary().map(|view| view.revision()).unwrap();

    sync.refresh().unwrap();
    sync.refresh().unwrap();

    let summary = sync.summary().unwrap();
    assert_eq!(summary.svg(), before);
    assert_eq!(summary.revision(), revision);
}

#[rstest]
#[case("", "", "", "Unknown Character", "Unknown Ability", "0.0")]
#[case("Ayla", "Blaze", "3.26", "Ayla", "Blaze", "3.3")]
#[case("  ", "Frost", "nope", "Unknown Character", "Frost", "0.0")]
fn summary_text_applies_placeholders(
    #[case] name: &str,
    #[case] ability: &str,
    #[case] level: &str,
    #[case] want_name: &str,
    #[case] want_ability: &str,
    #[case] want_level: &str,
) {
    let mut sync = controller();
    sync.on_name_input(name).unwrap();
    sync.on_ability_input(ability).unwrap();
    sync.on_level_input(level).unwrap();

    let text = sync.summary_text();
    assert_eq!(text.name, want_name);
    assert_eq!(text.ability, want_ability);
    assert_eq!(text.level, want_level);
}

#[test]
fn initial_inputs_seed_both_charts() {
    let initial = InitialInputs {
        stats: StatVector::new([1.0, 2.0, 3.0, 4.0, 5.0]),
        ..InitialInputs::default()
    };
    let mut sync = SyncController::new(ChartTheme::default(), initial).unwrap();
    open_overlay(&mut sync);

    assert_eq!(sync.primary().displayed_values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        sync.summary().unwrap().displayed_values(),
        &[1.0, 2.0, 3.0, 4.0, 5.0]
    );
}

// Export flow

#[derive(Default)]
struct RecordingControls {
    history: Vec<bool>,
}

impl ControlVisibility for RecordingControls {
    fn set_controls_hidden(&mut self, hidden: bool) {
        self.history.push(hidden);
    }
}

struct FixedCapture(Result<Vec<u8>, ExportError>);

impl Capture for FixedCapture {
    async fn capture(&self, _region: &ExportRegion) -> Result<Vec<u8>, ExportError> {
        self.0.clone()
    }
}

fn region(name: &str) -> ExportRegion {
    ExportRegion {
        svg: "<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_string(),
        size: Size::new(10.0, 10.0),
        character_name: name.to_string(),
    }
}

#[test]
fn export_restores_controls_after_failed_capture() {
    let capture = FixedCapture(Err(ExportError::Capture("canvas tainted".into())));
    let mut controls = RecordingControls::default();

    let result = block_on(export::export_png(&capture, &mut controls, &region("Ayla")));

    assert!(matches!(result, Err(ExportError::Capture(_))));
    assert_eq!(controls.history, vec![true, false]);
}

#[test]
fn export_restores_controls_after_success() {
    let capture = FixedCapture(Ok(vec![0x89, b'P', b'N', b'G']));
    let mut controls = RecordingControls::default();

    let image = block_on(export::export_png(&capture, &mut controls, &region("Sir Lancelot")))
        .unwrap();

    assert_eq!(image.filename, "Sir_Lancelot_characterChart.png");
    assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(controls.history, vec![true, false]);
}

#[test]
fn compose_requires_summary_chart() {
    let sync = controller();
    assert!(matches!(
        export::compose_region(&sync),
        Err(ExportError::NotReady(_))
    ));
}

#[test]
fn composed_region_embeds_summary_and_name() {
    let mut sync = controller();
    sync.on_name_input("Ayla").unwrap();
    open_overlay(&mut sync);

    let region = export::compose_region(&sync).unwrap();

    assert_eq!(region.character_name, "Ayla");
    assert!(region.svg.starts_with("<svg"));
    assert!(region.svg.contains("Ayla"));
    assert_eq!(region.size, sync.theme().export_size);
}
