//! The sheet component: form inputs, the live primary chart and the
//! export overlay. Every UI event is queued to one coroutine that applies it
//! to the [`SyncController`] in arrival order.

use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;

use crate::core::error::ChartResult;
use crate::core::layout::Size;
use crate::core::stats::{Axis, AXIS_COUNT};
use crate::core::theme::ChartTheme;
use crate::core::{format, platform, timing};
use crate::export::{self, ControlVisibility};
use crate::portrait;

use super::sync::{InitialInputs, LayoutTicket, OverlayState, SummaryText, SyncController};

type SheetState = Signal<Result<SyncController, String>>;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

impl ControlVisibility for Signal<bool> {
    fn set_controls_hidden(&mut self, hidden: bool) {
        self.set(hidden);
    }
}

#[component]
pub fn StatSheet() -> Element {
    let sheet: SheetState = use_signal(|| {
        SyncController::new(ChartTheme::default(), InitialInputs::default())
            .map_err(|err| err.to_string())
    });
    let last_error = use_signal(|| Option::<String>::None);
    let export_status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);
    let controls_hidden = use_signal(|| false);
    let overlay_key = use_signal(|| 0u64);

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<SheetEvent>| {
        let mut overlay_key = overlay_key;
        let mut export_status = export_status;
        let mut busy = busy;
        let controls_hidden = controls_hidden;

        async move {
            let mut pending: Option<LayoutTicket> = None;

            while let Some(event) = rx.next().await {
                match event {
                    SheetEvent::Stat(axis, raw) => {
                        apply(sheet, last_error, |sync| sync.on_stat_input(axis, &raw))
                    }
                    SheetEvent::Color(raw) => {
                        apply(sheet, last_error, |sync| sync.on_color_input(&raw))
                    }
                    SheetEvent::AxisColor(axis, raw) => apply(sheet, last_error, |sync| {
                        sync.on_axis_color_input(axis, &raw)
                    }),
                    SheetEvent::ToggleMultiColor => {
                        apply(sheet, last_error, |sync| sync.on_multi_color_toggle())
                    }
                    SheetEvent::ClearAxisColors => {
                        apply(sheet, last_error, |sync| sync.on_clear_axis_colors())
                    }
                    SheetEvent::Name(raw) => {
                        apply(sheet, last_error, |sync| sync.on_name_input(&raw))
                    }
                    SheetEvent::Ability(raw) => {
                        apply(sheet, last_error, |sync| sync.on_ability_input(&raw))
                    }
                    SheetEvent::Level(raw) => {
                        apply(sheet, last_error, |sync| sync.on_level_input(&raw))
                    }
                    SheetEvent::Portrait { filename, bytes } => {
                        let url = portrait::data_url(&filename, &bytes);
                        apply(sheet, last_error, |sync| sync.on_portrait(Some(url)))
                    }
                    SheetEvent::ViewRequest => {
                        let mut state = sheet;
                        let ticket = state
                            .with_mut(|s| s.as_mut().ok().map(|sync| sync.on_view_request()));
                        if let Some(ticket) = ticket {
                            pending = Some(ticket);
                            // Remounts the chart host, which reports back once laid out.
                            overlay_key.set(ticket.id());
                        }
                    }
                    SheetEvent::OverlayMounted(host, mounted) => {
                        let Some(ticket) = redeem(&mut pending, host) else {
                            continue;
                        };
                        let (fallback, delay) = match &*sheet.peek() {
                            Ok(sync) => (sync.theme().summary_size, sync.theme().layout_fallback_ms),
                            Err(_) => continue,
                        };
                        let size = measure(&mounted, fallback, delay).await;
                        apply(sheet, last_error, |sync| sync.on_layout_committed(ticket, size));
                    }
                    SheetEvent::Close => {
                        let mut state = sheet;
                        state.with_mut(|s| {
                            if let Ok(sync) = s.as_mut() {
                                sync.on_close();
                            }
                        });
                    }
                    SheetEvent::Export => {
                        if busy() {
                            continue;
                        }
                        busy.set(true);
                        export_status.set(ExportStatus::Working("Preparing PNG"));

                        let region = match &*sheet.peek() {
                            Ok(sync) => export::compose_region(sync).map_err(|err| err.to_string()),
                            Err(err) => Err(err.clone()),
                        };
                        let outcome = match region {
                            Ok(region) => {
                                let mut controls = controls_hidden;
                                export::perform_png_export(region, &mut controls).await
                            }
                            Err(err) => Err(err),
                        };
                        match outcome {
                            Ok(message) => export_status.set(ExportStatus::Done(message)),
                            Err(err) => export_status.set(ExportStatus::Error(err)),
                        }
                        busy.set(false);
                    }
                }
            }
        }
    });

    use_drop(move || {
        let mut sheet = sheet;
        let guard = sheet.try_write();
        if let Ok(mut state) = guard {
            if let Ok(sync) = std::mem::replace(&mut *state, Err("sheet closed".into())) {
                sync.teardown();
            }
        }
    });

    let snapshot = match &*sheet.read() {
        Ok(sync) => Ok(SheetSnapshot::capture(sync)),
        Err(err) => Err(err.clone()),
    };
    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(err) => {
            return rsx! {
                div { class: "sheet__error", "⚠️ {err}" }
            }
        }
    };

    let feedback = match &export_status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("sheet__meta".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "sheet__meta sheet__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "sheet__meta sheet__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let SheetSnapshot {
        primary_svg,
        summary_svg,
        stats,
        primary_color,
        axis_colors,
        multi_color,
        name,
        ability,
        level,
        summary_text,
        portrait_src,
        overlay,
        signature,
    } = snapshot;

    let summary_svg = summary_svg.unwrap_or_default();
    let (toggle_class, toggle_label) = if multi_color {
        ("button button--accent", "Single color")
    } else {
        ("button button--ghost", "Multi-color")
    };
    let error_message = last_error();
    let host_key = overlay_key();
    let controls_class = if controls_hidden() {
        "overlay__controls overlay__controls--hidden"
    } else {
        "overlay__controls"
    };

    rsx! {
        article { class: "sheet",
            div { class: "sheet__form",
                div { class: "sheet__portrait",
                    img { class: "sheet__portrait-img", src: "{portrait_src}", alt: "Character portrait" }
                    label { class: "sheet__field",
                        span { class: "sheet__label", "Portrait" }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            onchange: move |evt: FormEvent| {
                                let Some(files) = evt.files() else {
                                    return;
                                };
                                let Some(filename) = files.files().first().cloned() else {
                                    return;
                                };
                                platform::spawn_future(async move {
                                    match files.read_file(&filename).await {
                                        Some(bytes) => {
                                            coroutine.send(SheetEvent::Portrait { filename, bytes })
                                        }
                                        None => tracing::warn!(file = %filename, "portrait could not be read"),
                                    }
                                });
                            },
                        }
                    }
                }

                div { class: "sheet__meta-fields",
                    label { class: "sheet__field",
                        span { class: "sheet__label", "Name" }
                        input {
                            r#type: "text",
                            initial_value: "{name}",
                            oninput: move |evt| coroutine.send(SheetEvent::Name(evt.value())),
                        }
                    }
                    label { class: "sheet__field",
                        span { class: "sheet__label", "Ability" }
                        input {
                            r#type: "text",
                            initial_value: "{ability}",
                            oninput: move |evt| coroutine.send(SheetEvent::Ability(evt.value())),
                        }
                    }
                    label { class: "sheet__field",
                        span { class: "sheet__label", "Level" }
                        input {
                            r#type: "number",
                            step: "0.1",
                            initial_value: "{level}",
                            oninput: move |evt| coroutine.send(SheetEvent::Level(evt.value())),
                        }
                    }
                }

                div { class: "sheet__stats",
                    for (axis, value) in Axis::ALL.into_iter().zip(stats) {
                        label { key: "{axis.slug()}", class: "sheet__field sheet__field--stat",
                            span { class: "sheet__label", "{axis.label()}" }
                            input {
                                r#type: "number",
                                step: "0.1",
                                initial_value: "{value}",
                                oninput: move |evt| coroutine.send(SheetEvent::Stat(axis, evt.value())),
                            }
                        }
                    }
                }

                div { class: "sheet__colors",
                    label { class: "sheet__field",
                        span { class: "sheet__label", "Ability color" }
                        input {
                            r#type: "color",
                            value: "{primary_color}",
                            oninput: move |evt| coroutine.send(SheetEvent::Color(evt.value())),
                        }
                    }
                    button {
                        r#type: "button",
                        class: toggle_class,
                        onclick: move |_| coroutine.send(SheetEvent::ToggleMultiColor),
                        "{toggle_label}"
                    }
                    if multi_color {
                        div { class: "sheet__axis-colors",
                            for (axis, color) in Axis::ALL.into_iter().zip(axis_colors) {
                                label { key: "{axis.slug()}", class: "sheet__field sheet__field--axis-color",
                                    span { class: "sheet__label", "{axis.label()}" }
                                    input {
                                        r#type: "color",
                                        value: "{color}",
                                        oninput: move |evt| coroutine.send(SheetEvent::AxisColor(axis, evt.value())),
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                onclick: move |_| coroutine.send(SheetEvent::ClearAxisColors),
                                "Reset axis colors"
                            }
                        }
                    }
                }
            }

            div { class: "sheet__preview",
                div { class: "sheet__chart", dangerous_inner_html: "{primary_svg}" }
                p { class: "sheet__summary",
                    strong { "{summary_text.name}" }
                    " · {summary_text.ability} · Lv {summary_text.level}"
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| coroutine.send(SheetEvent::ViewRequest),
                    "View chart"
                }
            }

            if let Some(err) = error_message {
                div { class: "sheet__error", "⚠️ {err}" }
            }

            if overlay.visible {
                div { class: "overlay",
                    div { class: "overlay__card",
                        div { class: "overlay__header",
                            h2 { class: "overlay__name", "{overlay.text.name}" }
                            span { class: "overlay__level", "Lv {overlay.text.level}" }
                        }
                        div { class: "overlay__body",
                            img { class: "overlay__portrait", src: "{overlay.portrait}", alt: "Character portrait" }
                            div {
                                key: "{host_key}",
                                class: "overlay__chart",
                                onmounted: move |evt| coroutine.send(SheetEvent::OverlayMounted(host_key, evt.data())),
                                dangerous_inner_html: "{summary_svg}",
                            }
                        }
                        p { class: "overlay__ability", "{overlay.text.ability}" }
                        if let Some(signature) = signature {
                            p { class: "overlay__signature", "{signature}" }
                        }
                        div { class: "{controls_class}",
                            button {
                                r#type: "button",
                                class: "button button--primary",
                                disabled: busy(),
                                onclick: move |_| coroutine.send(SheetEvent::Export),
                                "Download PNG"
                            }
                            button {
                                r#type: "button",
                                class: "button button--ghost",
                                disabled: busy(),
                                onclick: move |_| coroutine.send(SheetEvent::Close),
                                "Close"
                            }
                        }
                        if let Some((class_name, message)) = feedback {
                            p { class: "{class_name}", "{message}" }
                        }
                    }
                }
            }
        }
    }
}

enum SheetEvent {
    Stat(Axis, String),
    Color(String),
    AxisColor(Axis, String),
    ToggleMultiColor,
    ClearAxisColors,
    Name(String),
    Ability(String),
    Level(String),
    Portrait { filename: String, bytes: Vec<u8> },
    ViewRequest,
    /// Chart host mounted; carries the ticket id the host was keyed with.
    OverlayMounted(u64, Rc<MountedData>),
    Close,
    Export,
}

/// Owned copy of everything the markup needs, so no signal borrow outlives the read.
struct SheetSnapshot {
    primary_svg: String,
    summary_svg: Option<String>,
    stats: [String; AXIS_COUNT],
    primary_color: String,
    axis_colors: Vec<String>,
    multi_color: bool,
    name: String,
    ability: String,
    level: String,
    summary_text: SummaryText,
    portrait_src: String,
    overlay: OverlayState,
    signature: Option<String>,
}

impl SheetSnapshot {
    fn capture(sync: &SyncController) -> Self {
        let meta = sync.meta();
        Self {
            primary_svg: sync.primary().svg(),
            summary_svg: sync.summary().map(|view| view.svg()),
            stats: sync.stats().values().map(|v| format::format_value(v, 1)),
            primary_color: sync.colors().primary().to_string(),
            axis_colors: Axis::ALL
                .iter()
                .map(|axis| sync.axis_picker(*axis).to_string())
                .collect(),
            multi_color: sync.colors().multi_color(),
            name: meta.name.clone(),
            ability: meta.ability.clone(),
            level: meta.level.clone(),
            summary_text: sync.summary_text().clone(),
            portrait_src: sync.portrait_src(),
            overlay: sync.overlay().clone(),
            signature: sync.theme().signature.clone(),
        }
    }
}

/// Take the outstanding ticket if `host` is the chart host keyed by it.
/// Mounts of superseded hosts leave it in place.
fn redeem(pending: &mut Option<LayoutTicket>, host: u64) -> Option<LayoutTicket> {
    if pending.is_some_and(|ticket| ticket.id() == host) {
        pending.take()
    } else {
        None
    }
}

/// Apply one handler to the controller; failures land in the error banner.
fn apply<F>(mut sheet: SheetState, mut last_error: Signal<Option<String>>, handler: F)
where
    F: FnOnce(&mut SyncController) -> ChartResult<()>,
{
    let outcome = sheet.with_mut(|state| match state {
        Ok(sync) => handler(sync).map_err(|err| err.to_string()),
        Err(err) => Err(err.clone()),
    });
    match outcome {
        Ok(()) => {
            if last_error.peek().is_some() {
                last_error.set(None);
            }
        }
        Err(err) => {
            tracing::warn!(%err, "sheet update failed");
            last_error.set(Some(err));
        }
    }
}

/// Size of the freshly mounted chart host. If the host cannot be measured yet,
/// wait a short fixed delay and try once more before using the theme size.
async fn measure(mounted: &MountedData, fallback: Size, delay_ms: u64) -> Size {
    if let Some(size) = client_size(mounted).await {
        return size;
    }
    tracing::warn!(delay_ms, "overlay not measurable yet, retrying after fixed delay");
    timing::sleep_ms(delay_ms).await;
    client_size(mounted).await.unwrap_or(fallback)
}

async fn client_size(mounted: &MountedData) -> Option<Size> {
    let rect = mounted.get_client_rect().await.ok()?;
    let size = Size::new(rect.size.width, rect.size.height);
    (!size.is_empty()).then_some(size)
}
