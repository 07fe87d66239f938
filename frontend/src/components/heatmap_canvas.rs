use log::warn;
use shared::heatmap::HeatmapImage;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct HeatmapCanvasProps {
    pub image: HeatmapImage,
}

/// Paints a rasterised heatmap onto `canvas`, resizing it to fit.
pub fn paint(canvas: &HtmlCanvasElement, image: &HeatmapImage) {
    canvas.set_width(image.width);
    canvas.set_height(image.height);

    let ctx = match canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    {
        Some(ctx) => ctx,
        None => {
            warn!("Canvas has no 2d context, skipping heatmap");
            return;
        }
    };

    ctx.set_fill_style_str(&image.background.css());
    ctx.fill_rect(0.0, 0.0, image.width as f64, image.height as f64);

    for cell in &image.cells {
        ctx.set_fill_style_str(&cell.color.css());
        ctx.fill_rect(cell.x as f64, cell.y as f64, cell.size as f64, cell.size as f64);
    }
}

#[function_component(HeatmapCanvas)]
pub fn heatmap_canvas(props: &HeatmapCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.image.clone(), move |image| {
            match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => paint(&canvas, image),
                None => warn!("Heatmap canvas not mounted"),
            }
            || ()
        });
    }

    html! {
        <canvas ref={canvas_ref} class="heatmap-canvas"></canvas>
    }
}
