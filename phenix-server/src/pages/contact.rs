use axum::{extract::State, response::Html};

use super::layout::{NavItem, Page};
use crate::infra::{app_state::AppState, errors::AppResult};
use crate::routes::paths;

/// Posts the form as JSON and shows the server's message.
const FORM_SCRIPT: &str = r#"<script>
document.getElementById("contact-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = event.currentTarget;
  const status = document.getElementById("contact-status");
  const payload = Object.fromEntries(new FormData(form).entries());
  const response = await fetch(form.action, {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(payload),
  });
  const body = await response.json().catch(() => ({}));
  status.textContent = body.message || body.error || "";
  status.className = response.ok ? "form-status success" : "form-status error";
  if (response.ok) form.reset();
});
</script>"#;

pub fn render_contact(csrf_token: &str) -> String {
    format!(
        r#"<section class="contact-intro">
<h1>Contact</h1>
<p>Prêt à donner vie à votre projet en fer forgé ? Contactez-moi pour discuter de vos idées.</p>
</section>
<section class="contact">
<div class="contact-text">
<h2>Mes œuvres vous ont plu ?</h2>
<p>Vous souhaitez que l'on travaille ensemble sur un projet ?</p>
<p>Vous pouvez m'envoyer un message via le formulaire ci-contre.</p>
<p>Je prendrais contact avec vous le plus rapidement possible.</p>
</div>
<form id="contact-form" method="post" action="{action}">
<input type="hidden" name="csrfToken" value="{csrf_token}">
<label for="nom">Nom *</label>
<input id="nom" name="nom" required minlength="2" maxlength="100" placeholder="Votre nom complet">
<label for="email">Email *</label>
<input id="email" name="email" type="email" required placeholder="votre@email.com">
<label for="telephone">Téléphone</label>
<input id="telephone" name="telephone" type="tel" placeholder="06 12 34 56 78 (optionnel)">
<label for="sujet">Sujet *</label>
<input id="sujet" name="sujet" required minlength="5" maxlength="200" placeholder="Objet de votre message">
<label for="message">Message *</label>
<textarea id="message" name="message" required minlength="10" maxlength="2000" rows="6" placeholder="Décrivez votre projet ou votre demande..."></textarea>
<button type="submit">Envoyer le message</button>
<p id="contact-status" class="form-status" role="status"></p>
</form>
</section>
{FORM_SCRIPT}"#,
        action = paths::api::CONTACT,
    )
}

pub async fn contact_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let csrf_token = state.crypto.generate_token()?;
    Ok(Html(
        Page {
            title: "Contact",
            active: NavItem::Contact,
            body: render_contact(&csrf_token),
            carousel: false,
        }
        .render(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_token_and_posts_to_api() {
        let html = render_contact("abc_DEF-123");
        assert!(html.contains(r#"name="csrfToken" value="abc_DEF-123""#));
        assert!(html.contains(r#"action="/api/contact""#));
    }
}
