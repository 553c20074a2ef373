//! Plain-text storefront page for the terminal front end.
//!
//! Rendering is a pure projection of [`ProductView`]; it keeps no state.

use std::fmt::Write;

use crate::store::{DetailView, ProductView, Status};

const RULE: &str = "────────────────────────────────────────";

pub fn render(view: &ProductView) -> String {
    let mut out = String::new();

    match view.status {
        Status::Idle => {
            out.push_str("Cole o link de um produto e pressione Enter.\n");
        }
        Status::Loading => {
            let _ = writeln!(out, "Buscando {} ...", view.request_url);
        }
        Status::Error => {
            let _ = writeln!(
                out,
                "Erro: {}",
                view.error_message.as_deref().unwrap_or_default()
            );
        }
        Status::Ready => {
            if let Some(detail) = &view.detail {
                render_detail(&mut out, detail);
            }
        }
    }

    out.push_str("Comandos: <url> | :img N | :copy | :quit\n");
    out
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let _ = writeln!(out, "{}", RULE);
    match &detail.primary_image {
        Some(url) => {
            let _ = writeln!(out, "[imagem] {}", url);
        }
        None => out.push_str("[sem imagem]\n"),
    }

    if detail.thumbnails.len() > 1 {
        let strip: Vec<String> = detail
            .thumbnails
            .iter()
            .map(|thumb| {
                if thumb.selected {
                    format!("[{}]", thumb.index)
                } else {
                    format!(" {} ", thumb.index)
                }
            })
            .collect();
        let _ = writeln!(out, "Miniaturas: {}", strip.join(""));
    }

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", detail.name);
    let _ = writeln!(
        out,
        "{} {} | {} vendidos",
        detail.stars, detail.rating, detail.sold
    );
    let _ = writeln!(out, "{}", detail.price);
    let _ = writeln!(out, "\n{}\n", detail.description);

    if !detail.reviews.is_empty() {
        let _ = writeln!(out, "Avaliações ({})", detail.reviews.len());
        for review in &detail.reviews {
            let _ = writeln!(out, "  {} ({}): {}", review.user, review.rating, review.comment);
        }
    }

    if detail.copied {
        out.push_str("✓ Copiado!\n");
    }
    let _ = writeln!(out, "{}", RULE);
}
