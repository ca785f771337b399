use axum::{
    Extension,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use phenix_carousel::{alt_text, escape_html, resolve_source};
use phenix_core::auth::Session;
use phenix_model::{Category, ContactMessage, GalleryEntry, GalleryOrder};

use super::layout::{NavItem, Page};
use crate::handlers::admin::{auth::session_token, upload};
use crate::infra::{app_state::AppState, errors::AppResult};
use crate::routes::paths;

const LOGIN_SCRIPT: &str = r#"<script>
document.getElementById("login-form").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = event.currentTarget;
  const payload = Object.fromEntries(new FormData(form).entries());
  const response = await fetch(form.action, {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(payload),
  });
  if (response.ok) {
    window.location.assign("/admin/dashboard");
  } else {
    const body = await response.json().catch(() => ({}));
    document.getElementById("login-status").textContent = body.error || "Erreur";
  }
});
</script>"#;

const LOGOUT_SCRIPT: &str = r#"<script>
document.getElementById("logout").addEventListener("click", async () => {
  await fetch("/api/admin/logout", { method: "POST" });
  window.location.assign("/admin");
});
</script>"#;

pub fn render_login() -> String {
    format!(
        r#"<section class="admin-login">
<h1>Administration</h1>
<form id="login-form" method="post" action="{action}">
<label for="username">Identifiant</label>
<input id="username" name="username" autocomplete="username" required>
<label for="password">Mot de passe</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Se connecter</button>
<p id="login-status" class="form-status error" role="alert"></p>
</form>
</section>
{LOGIN_SCRIPT}"#,
        action = paths::api::ADMIN_LOGIN,
    )
}

/// Already signed-in visitors skip the login form.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state
        .sessions
        .is_authenticated(session_token(&headers).as_deref())
        .await
    {
        return Redirect::to(paths::ADMIN_DASHBOARD_PAGE).into_response();
    }
    Html(
        Page {
            title: "Administration",
            active: NavItem::Admin,
            body: render_login(),
            carousel: false,
        }
        .render(),
    )
    .into_response()
}

/// Drives the entry editors, uploads and the delete confirmation.
const MANAGE_SCRIPT: &str = r#"<script>
(() => {
  const manager = document.getElementById("admin-manager");
  const status = document.getElementById("admin-status");
  const dialog = document.getElementById("confirm-delete");
  const allowed = manager.dataset.allowedTypes.split(",");
  const maxBytes = Number(manager.dataset.maxBytes);
  let pendingDelete = null;

  const showError = (message) => {
    status.textContent = message;
    status.className = "form-status error";
  };
  const readError = async (response, fallback) => {
    const body = await response.json().catch(() => ({}));
    return body.error || fallback;
  };
  const imageSrc = (src, category) =>
    src.startsWith("http://") || src.startsWith("https://") ? src : `/${category}/${src}`;

  for (const form of document.querySelectorAll(".entry-form")) {
    const list = form.querySelector(".entry-images");
    const picker = form.querySelector('input[type="file"]');
    let images = [];
    let pending = [];

    const render = () => {
      const item = (src, label, remove) => {
        const li = document.createElement("li");
        const img = document.createElement("img");
        img.src = src;
        img.alt = label;
        const button = document.createElement("button");
        button.type = "button";
        button.className = "remove-image";
        button.title = "Retirer";
        button.textContent = "×";
        button.addEventListener("click", () => { remove(); render(); });
        li.append(img, button);
        return li;
      };
      list.replaceChildren(
        ...images.map((src, index) => item(
          imageSrc(src, form.dataset.category),
          `Image ${index + 1}`,
          () => images.splice(index, 1),
        )),
        ...pending.map((entry, index) => item(
          entry.preview,
          `Nouvelle image ${index + 1}`,
          () => { URL.revokeObjectURL(entry.preview); pending.splice(index, 1); },
        )),
      );
    };

    const close = () => {
      pending.forEach((entry) => URL.revokeObjectURL(entry.preview));
      pending = [];
      images = [];
      form.reset();
      form.hidden = true;
    };

    form.openEditor = (entry) => {
      close();
      form.elements.entryId.value = entry ? entry.id : "";
      form.elements.titre.value = entry ? entry.titre : "";
      form.elements.description.value = entry ? entry.description : "";
      form.querySelector(".entry-form-title").textContent =
        entry ? "Modifier l'entrée" : "Nouvelle entrée";
      images = entry ? [...entry.images] : [];
      render();
      form.hidden = false;
      form.elements.titre.focus();
    };

    picker.addEventListener("change", () => {
      const files = Array.from(picker.files);
      picker.value = "";
      if (files.some((file) => !allowed.includes(file.type))) {
        return showError("Types de fichiers non supportés. Utilisez JPEG, PNG ou WebP.");
      }
      if (files.some((file) => file.size > maxBytes)) {
        return showError("Certains fichiers sont trop volumineux (max 10MB).");
      }
      pending.push(...files.map((file) => ({ file, preview: URL.createObjectURL(file) })));
      status.textContent = "";
      render();
    });

    form.querySelector('[data-entry-action="cancel"]').addEventListener("click", close);

    form.addEventListener("submit", async (event) => {
      event.preventDefault();
      const id = form.elements.entryId.value;
      const titre = form.elements.titre.value.trim();
      const description = form.elements.description.value.trim();
      if (!titre || !description) {
        return showError("Titre et description sont requis");
      }
      if (!id && pending.length === 0 && images.length === 0) {
        return showError("Au moins une image est requise");
      }
      const submit = form.querySelector('button[type="submit"]');
      submit.disabled = true;
      try {
        let uploaded = [];
        if (pending.length > 0) {
          const body = new FormData();
          pending.forEach((entry) => body.append("images", entry.file));
          const response = await fetch(manager.dataset.upload, { method: "POST", body });
          if (!response.ok) {
            return showError(await readError(response, "Erreur lors de l'upload"));
          }
          uploaded = (await response.json()).urls;
        }
        const target = id ? `${form.dataset.collection}/${id}` : form.dataset.collection;
        const response = await fetch(target, {
          method: id ? "PUT" : "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ titre, description, images: [...images, ...uploaded] }),
        });
        if (!response.ok) {
          return showError(await readError(response, "Erreur lors de la sauvegarde"));
        }
        close();
        window.location.reload();
      } finally {
        submit.disabled = false;
      }
    });
  }

  manager.addEventListener("click", async (event) => {
    const button = event.target.closest("[data-entry-action][data-category]");
    if (!button) return;
    const form = document.getElementById(`entry-form-${button.dataset.category}`);
    const item = `${form.dataset.collection}/${button.dataset.id}`;
    switch (button.dataset.entryAction) {
      case "new":
        form.openEditor(null);
        break;
      case "edit": {
        const response = await fetch(item);
        if (!response.ok) {
          return showError(await readError(response, "Impossible de charger l'entrée"));
        }
        form.openEditor(await response.json());
        break;
      }
      case "delete":
        pendingDelete = item;
        dialog.showModal();
        break;
    }
  });

  dialog.addEventListener("close", async () => {
    const target = pendingDelete;
    pendingDelete = null;
    if (dialog.returnValue !== "confirm" || !target) return;
    const response = await fetch(target, { method: "DELETE" });
    if (!response.ok) {
      return showError(await readError(response, "Erreur lors de la suppression"));
    }
    window.location.reload();
  });
})();
</script>"#;

const DELETE_DIALOG: &str = r#"<dialog id="confirm-delete">
<form method="dialog">
<h3>Confirmer la suppression</h3>
<p>Êtes-vous sûr de vouloir supprimer cette entrée ? Cette action est irréversible.</p>
<button type="submit" value="confirm" class="danger">Supprimer</button>
<button type="submit" value="cancel">Annuler</button>
</form>
</dialog>"#;

fn thumbnails(entry: &GalleryEntry) -> String {
    entry
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            format!(
                r#"<img class="thumb" src="{}" alt="{}" loading="lazy">"#,
                escape_html(&resolve_source(image, entry.category)),
                escape_html(&alt_text(&entry.title, index)),
            )
        })
        .collect()
}

fn entry_form(category: Category) -> String {
    let key = category.as_str();
    format!(
        r#"<form class="entry-form" id="entry-form-{key}" data-category="{key}" data-collection="{collection}" hidden>
<h3 class="entry-form-title">Nouvelle entrée</h3>
<input type="hidden" name="entryId" value="">
<label for="titre-{key}">Titre *</label>
<input id="titre-{key}" name="titre" required>
<label for="description-{key}">Description *</label>
<textarea id="description-{key}" name="description" rows="4" required></textarea>
<label for="images-{key}">Images</label>
<input id="images-{key}" name="{field}" type="file" multiple accept="{accept}">
<p class="hint">Formats acceptés: JPEG, PNG, WebP. Taille max: 10MB par fichier.</p>
<ul class="entry-images"></ul>
<button type="submit">Enregistrer</button>
<button type="button" data-entry-action="cancel">Annuler</button>
</form>"#,
        collection = paths::admin_collection(category),
        field = upload::FIELD_NAME,
        accept = upload::ALLOWED_TYPES.join(","),
    )
}

fn entries_table(category: Category, entries: &[GalleryEntry]) -> String {
    let key = category.as_str();
    let rows: String = entries
        .iter()
        .map(|entry| {
            format!(
                r#"<tr><td>{id}</td><td>{title}</td><td class="thumbs">{thumbs}</td><td>{updated}</td><td class="actions"><button type="button" data-entry-action="edit" data-category="{key}" data-id="{id}">Modifier</button> <button type="button" class="danger" data-entry-action="delete" data-category="{key}" data-id="{id}">Supprimer</button></td></tr>"#,
                id = entry.id,
                title = escape_html(&entry.title),
                thumbs = thumbnails(entry),
                updated = entry.updated_at.format("%d/%m/%Y"),
            )
        })
        .collect();
    let body = if entries.is_empty() {
        r#"<p class="empty">Aucune entrée pour le moment.</p>"#.to_string()
    } else {
        format!(
            r#"<table><thead><tr><th>ID</th><th>Titre</th><th>Images</th><th>Modifié</th><th></th></tr></thead>
<tbody>{rows}</tbody></table>"#
        )
    };
    format!(
        r#"<section class="admin-section" id="admin-{key}">
<h2>{label} <span class="count">{count}</span></h2>
<button type="button" data-entry-action="new" data-category="{key}">Ajouter</button>
{form}
{body}
</section>"#,
        label = category.label(),
        count = entries.len(),
        form = entry_form(category),
    )
}

fn messages_table(messages: &[ContactMessage]) -> String {
    if messages.is_empty() {
        return r#"<section class="admin-section" id="admin-messages"><h2>Messages <span class="count">0</span></h2><p>Aucun message.</p></section>"#.to_string();
    }
    let rows: String = messages
        .iter()
        .map(|message| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                message.created_at.format("%d/%m/%Y %H:%M"),
                escape_html(&message.name),
                escape_html(&message.email),
                escape_html(message.phone.as_deref().unwrap_or("")),
                escape_html(&message.subject),
                escape_html(&message.message).replace('\n', "<br>"),
            )
        })
        .collect();
    format!(
        r#"<section class="admin-section" id="admin-messages">
<h2>Messages <span class="count">{count}</span></h2>
<table><thead><tr><th>Date</th><th>Nom</th><th>Email</th><th>Téléphone</th><th>Sujet</th><th>Message</th></tr></thead>
<tbody>{rows}</tbody></table>
</section>"#,
        count = messages.len(),
    )
}

pub fn render_dashboard(
    username: &str,
    art: &[GalleryEntry],
    fittings: &[GalleryEntry],
    messages: &[ContactMessage],
) -> String {
    format!(
        r#"<section class="admin-header">
<h1>Tableau de bord</h1>
<p>Connecté en tant que <strong>{user}</strong> <button id="logout" type="button">Se déconnecter</button></p>
<p id="admin-status" class="form-status" role="alert"></p>
</section>
<div id="admin-manager" data-upload="{upload_path}" data-allowed-types="{allowed}" data-max-bytes="{max_bytes}">
{art}
{fittings}
</div>
{messages}
{DELETE_DIALOG}
{LOGOUT_SCRIPT}
{MANAGE_SCRIPT}"#,
        user = escape_html(username),
        upload_path = paths::api::ADMIN_UPLOAD,
        allowed = upload::ALLOWED_TYPES.join(","),
        max_bytes = upload::MAX_FILE_BYTES,
        art = entries_table(Category::Art, art),
        fittings = entries_table(Category::Fittings, fittings),
        messages = messages_table(messages),
    )
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Html<String>> {
    let gallery = state.db.gallery();
    let art = gallery.list(Category::Art, GalleryOrder::IdAscending).await?;
    let fittings = gallery
        .list(Category::Fittings, GalleryOrder::IdAscending)
        .await?;
    let messages = state.db.contacts().list_newest_first().await?;

    Ok(Html(
        Page {
            title: "Tableau de bord",
            active: NavItem::Admin,
            body: render_dashboard(&session.username, &art, &fittings, &messages),
            carousel: false,
        }
        .render(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn dashboard_lists_counts_and_escapes_messages() {
        let message = ContactMessage {
            id: 1,
            name: "<script>".into(),
            email: "a@b.fr".into(),
            phone: None,
            subject: "Sujet test".into(),
            message: "ligne 1\nligne 2".into(),
            ip_address: "unknown".into(),
            user_agent: None,
            created_at: Utc::now(),
        };
        let html = render_dashboard("admin", &[], &[], &[message]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("ligne 1<br>ligne 2"));
        assert!(html.contains(r#"<h2>Messages <span class="count">1</span></h2>"#));
        assert!(html.contains(r#"<h2>Art en fer <span class="count">0</span></h2>"#));
    }

    #[test]
    fn each_category_gets_an_editor_and_row_actions() {
        let now = Utc::now();
        let entry = GalleryEntry {
            id: 7,
            title: "Rampe".into(),
            description: "Rampe d'escalier".into(),
            category: Category::Fittings,
            images: vec!["rampe-1.jpg".into(), "https://blob.example/artwork/x.jpg".into()],
            created_at: now,
            updated_at: now,
        };
        let html = render_dashboard("admin", &[], &[entry], &[]);

        for key in ["art", "amenagement"] {
            assert!(html.contains(&format!(
                r#"id="entry-form-{key}" data-category="{key}" data-collection="/api/admin/{key}""#
            )));
            assert!(html.contains(&format!(
                r#"data-entry-action="new" data-category="{key}""#
            )));
        }
        assert!(html.contains(
            r#"data-entry-action="edit" data-category="amenagement" data-id="7""#
        ));
        assert!(html.contains(
            r#"data-entry-action="delete" data-category="amenagement" data-id="7""#
        ));
        assert!(html.contains(r#"src="/amenagement/rampe-1.jpg""#));
        assert!(html.contains(r#"src="https://blob.example/artwork/x.jpg""#));
        assert!(html.contains(r#"data-upload="/api/admin/upload""#));
        assert!(html.contains(
            r#"type="file" multiple accept="image/jpeg,image/jpg,image/png,image/webp""#
        ));
        assert!(html.contains(r#"<dialog id="confirm-delete">"#));
        assert!(html.contains("Aucune entrée pour le moment."));
    }
}
