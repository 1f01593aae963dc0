use fortuna_core::{RunningStream, Stream};
use yew::prelude::*;

mod api;
mod panel;

use panel::ParticipantsPanel;

#[function_component(App)]
fn app() -> Html {
    let streams = use_state(Vec::<RunningStream>::new);
    let selected = use_state(|| None::<Stream>);

    {
        let streams = streams.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_running_streams().await {
                    Ok(list) => streams.set(list),
                    Err(e) => web_sys::console::error_1(&format!("Failed to fetch streams: {e}").into()),
                }
            });
            || ()
        });
    }

    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_: ()| selected.set(None))
    };
    // l'estrazione vera e propria non è di competenza del pannello
    let on_lucky_draw = {
        let selected = selected.clone();
        Callback::from(move |_: ()| {
            if let Some(stream) = (*selected).as_ref() {
                web_sys::console::log_1(&format!("lucky draw requested for {}", stream.id).into());
            }
        })
    };

    html! {
        <section style="font-family: system-ui, Arial, sans-serif; padding: 2rem;">
            <h1>{ "Running streams" }</h1>
            <ul>
                { for streams.iter().map(|rs| {
                    let stream = rs.stream.clone();
                    let selected = selected.clone();
                    let onclick = Callback::from(move |_: MouseEvent| selected.set(Some(stream.clone())));
                    html! {
                        <li key={rs.stream.id.clone()}>
                            <button {onclick}>{ rs.stream.title.clone() }</button>
                            if rs.joined { <span>{ " (joined)" }</span> }
                        </li>
                    }
                }) }
            </ul>
            <ParticipantsPanel stream={(*selected).clone()} {on_close} {on_lucky_draw} />
        </section>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
