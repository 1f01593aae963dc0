use std::{cell::RefCell, rc::Rc};

use fortuna_core::{FetchTicket, PanelBody, PanelState, PanelView, ParticipantRow, Stream, POLL_INTERVAL};
use gloo_timers::callback::Interval;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::api;

#[derive(Properties, PartialEq)]
pub struct ParticipantsPanelProps {
    pub stream: Option<Stream>,
    pub on_close: Callback<()>,
    pub on_lucky_draw: Callback<()>,
}

/// Overlay con il roster dello stream selezionato, aggiornato ogni 5 secondi.
#[function_component(ParticipantsPanel)]
pub fn participants_panel(props: &ParticipantsPanelProps) -> Html {
    let state = use_mut_ref(PanelState::new);
    let redraw = use_force_update();

    // un ciclo di polling per id: cambia solo quando cambia lo stream selezionato
    {
        let state = state.clone();
        let redraw = redraw.clone();
        let stream = props.stream.clone();
        use_effect_with(props.stream.as_ref().map(|s| s.id.clone()), move |_| {
            let ticket = state.borrow_mut().select(stream);
            redraw.force_update();

            let interval = ticket.map(|ticket| {
                spawn_fetch(state.clone(), redraw.clone(), ticket.clone());
                let (state, redraw) = (state.clone(), redraw.clone());
                Interval::new(POLL_INTERVAL.as_millis() as u32, move || {
                    spawn_fetch(state.clone(), redraw.clone(), ticket.clone());
                })
            });

            move || {
                // ferma il timer e invalida le risposte ancora in volo
                drop(interval);
                state.borrow_mut().select(None);
            }
        });
    }

    let Some(stream) = props.stream.as_ref() else {
        return html! {};
    };
    state.borrow_mut().refresh(stream);
    let view = if state.borrow().stream().map(|s| s.id.as_str()) == Some(stream.id.as_str()) {
        state.borrow().view()
    } else {
        // l'effetto per il nuovo stream non è ancora partito: niente roster vecchio a schermo
        let mut pending = PanelState::new();
        pending.select(Some(stream.clone()));
        pending.view()
    };
    let PanelView::Open { title, participant_count, show_lucky_draw, body } = view else {
        return html! {};
    };

    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let on_lucky_draw = props.on_lucky_draw.reform(|_: MouseEvent| ());

    html! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4">
            <div class="bg-gray-800 rounded-xl p-4 lg:p-6 w-full max-w-4xl max-h-[90vh] overflow-y-auto">
                <div class="flex flex-col sm:flex-row sm:items-center justify-between mb-6 gap-4">
                    <div>
                        <h2 class="text-xl lg:text-2xl font-bold">{ title }</h2>
                        <p class="text-gray-400">{ format!("{participant_count} participants") }</p>
                    </div>
                    <div class="flex items-center gap-3">
                        if show_lucky_draw {
                            <button onclick={on_lucky_draw} class="bg-gradient-to-r from-purple-600 to-pink-600 px-4 py-2 rounded-lg">
                                { "Lucky Draw" }
                            </button>
                        }
                        <button onclick={on_close} class="bg-gray-700 hover:bg-gray-600 px-4 py-2 rounded-lg">
                            { "Close" }
                        </button>
                    </div>
                </div>
                { render_body(body) }
            </div>
        </div>
    }
}

fn render_body(body: PanelBody) -> Html {
    match body {
        PanelBody::Loading => html! {
            <div class="text-center py-12">
                <div class="w-6 h-6 border-2 border-white border-t-transparent rounded-full animate-spin mx-auto mb-4" />
                <p class="text-gray-400">{ "Loading participants..." }</p>
            </div>
        },
        PanelBody::Empty => html! {
            <div class="text-center py-12">
                <p class="text-gray-400">{ "No participants yet" }</p>
            </div>
        },
        PanelBody::Roster(rows) => html! {
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                { for rows.into_iter().map(render_row) }
            </div>
        },
    }
}

fn render_row(row: ParticipantRow) -> Html {
    let joined = local_time(&row.joined_at).unwrap_or(row.joined);
    html! {
        <div key={row.id} class="bg-gray-700 rounded-lg p-4">
            <div class="flex items-center gap-3 mb-3">
                <div class="w-10 h-10 rounded-full flex items-center justify-center flex-shrink-0">
                    <span class="text-white font-bold text-sm">{ row.avatar }</span>
                </div>
                <div class="min-w-0 flex-1">
                    <h4 class="font-semibold truncate">{ row.name }</h4>
                    <p class="text-xs text-gray-400 truncate">{ row.upi }</p>
                </div>
            </div>
            <p class="text-xs text-gray-500">{ format!("Joined: {joined}") }</p>
        </div>
    }
}

/// Data nel formato locale del browser; `None` se il timestamp non è valido.
fn local_time(raw: &str) -> Option<String> {
    let date = js_sys::Date::new(&JsValue::from_str(raw));
    if date.get_time().is_nan() {
        return None;
    }
    Some(date.to_locale_string("default", &JsValue::UNDEFINED).into())
}

fn spawn_fetch(state: Rc<RefCell<PanelState>>, redraw: UseForceUpdateHandle, ticket: FetchTicket) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = api::fetch_participants(&ticket.stream_id).await.map_err(|e| {
            web_sys::console::error_1(&format!("Failed to fetch participants: {e}").into());
            e
        });
        if state.borrow_mut().apply(&ticket, outcome) {
            redraw.force_update();
        }
    });
}
