use axum::response::Html;

use super::layout::{NavItem, Page};

pub async fn home_page() -> Html<String> {
    let body = r#"<section class="hero">
<span class="eyebrow">FERRONNIER D'ART</span>
<h1>Phenix Ferronnerie</h1>
<p><strong>Ferronnier d'art à Paris et Île-de-France</strong><br>
Je m'appelle Pablo Kofteci, j'ai 30 ans d'expérience dans la ferronnerie d'art.<br>
Je réalise vos aménagements métalliques sur mesure : <strong>portails fer forgé, escaliers, rambardes, marquises, barreaux de fenêtres</strong> et décorations métalliques. J'effectue aussi la pose.<br>
Spécialisé dans les créations artistiques en fer forgé, je travaille sur commande selon vos besoins.<br>
Vous trouverez sur mon site une partie de mes réalisations. <strong>Je me déplace dans tout l'Île-de-France : Paris, Seine-et-Marne (77), Yvelines (78), Essonne (91), Hauts-de-Seine (92), Seine-Saint-Denis (93), Val-de-Marne (94), Val-d'Oise (95).</strong></p>
<div class="actions">
<a class="button primary" href="/art">Découvrir l'art en fer</a>
<a class="button" href="/amenagement">Voir les aménagements</a>
</div>
<img class="hero-image" src="/accueil.jpg" alt="Phenix Ferronnerie - Créations en fer forgé">
</section>"#;

    Html(
        Page {
            title: "Accueil",
            active: NavItem::Home,
            body: body.to_string(),
            carousel: false,
        }
        .render(),
    )
}
