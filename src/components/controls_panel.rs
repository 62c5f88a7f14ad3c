use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::render::Hud;
use crate::session::ControlInput;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub opacity: f64,
    pub scale: f64,
    pub rotation: f64,
    pub hud: Hud,
    pub locked: bool,
    pub lock_icon: AttrValue,
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_step: f64,
    pub rotation_range: f64,
    pub on_control: Callback<ControlInput>,
    pub on_file: Callback<web_sys::File>,
    pub on_flip_camera: Callback<()>,
}

fn slider(cb: &Callback<ControlInput>, make: fn(f64) -> ControlInput) -> Callback<InputEvent> {
    let cb = cb.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        if let Ok(v) = input.value().parse::<f64>() {
            cb.emit(make(v));
        }
    })
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let reset_cb = {
        let cb = props.on_control.clone();
        Callback::from(move |_| cb.emit(ControlInput::Reset))
    };
    let lock_cb = {
        let cb = props.on_control.clone();
        Callback::from(move |_| cb.emit(ControlInput::ToggleLock))
    };
    let flip_cb = {
        let cb = props.on_flip_camera.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let file_cb = {
        let cb = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // No file selected is not an error.
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                cb.emit(file);
            }
            input.set_value("");
        })
    };

    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "width:64px; font-weight:500;";
    let value_style = "min-width:48px; text-align:right; font-variant-numeric:tabular-nums;";
    let range = props.rotation_range;
    html! {<div style="position:absolute; left:12px; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 12px; display:flex; flex-direction:column; gap:6px; font-size:13px;">
        <div style={row_style}>
            <span style={label_style}>{"Opacity"}</span>
            <input id="opacity" type="range" min="0" max="1" step="0.01" style="flex:1;"
                value={props.opacity.to_string()} oninput={slider(&props.on_control, ControlInput::Opacity)} />
            <span style={value_style}>{ props.hud.opacity.clone() }</span>
        </div>
        <div style={row_style}>
            <span style={label_style}>{"Scale"}</span>
            <input id="scale" type="range" style="flex:1;"
                min={props.min_scale.to_string()} max={props.max_scale.to_string()} step={props.scale_step.to_string()}
                value={props.scale.to_string()} oninput={slider(&props.on_control, ControlInput::Scale)} />
            <span style={value_style}>{ props.hud.scale.clone() }</span>
        </div>
        <div style={row_style}>
            <span style={label_style}>{"Rotate"}</span>
            <input id="rotate" type="range" style="flex:1;"
                min={(-range).to_string()} max={range.to_string()} step="1"
                value={props.rotation.to_string()} oninput={slider(&props.on_control, ControlInput::Rotation)} />
            <span style={value_style}>{ props.hud.rotation.clone() }</span>
        </div>
        <div style={format!("{row_style} flex-wrap:wrap;")}>
            <label style="flex:1; cursor:pointer;">
                <input id="fileInput" type="file" accept="image/*" onchange={file_cb} />
            </label>
            <button onclick={reset_cb}>{"Reset"}</button>
            <button onclick={lock_cb} title={if props.locked { "Unlock overlay" } else { "Lock overlay" }}>{ props.lock_icon.clone() }</button>
            <button onclick={flip_cb}>{"Flip camera"}</button>
        </div>
    </div>}
}
