//! Initial gallery content and notification recipient.

use phenix_model::{Category, GalleryEntryDraft};
use tracing::info;

use crate::database::DatabaseContext;
use crate::error::Result;

pub const DEFAULT_RECIPIENT: &str = "contact@fenix-metal.fr";

struct SeedEntry {
    title: &'static str,
    description: &'static str,
    images: &'static [&'static str],
}

const ART: &[SeedEntry] = &[
    SeedEntry {
        title: "La Balance de la Justice",
        description: "Sculpture en fer forgé représentant la balance de la justice, symbole d'équilibre et de vérité. Pièce unique créée au feu de forge avec une attention particulière portée aux détails et à la symétrie.",
        images: &["balance-1.JPG", "balance-2.JPG"],
    },
    SeedEntry {
        title: "L'Aigle Royal",
        description: "Majestueuse sculpture d'aigle royal en fer forgé, capturant la puissance et la grâce de ce rapace légendaire. Chaque plume est méticuleusement travaillée pour créer un effet de mouvement et de réalisme.",
        images: &["aigle-1.jpg", "aigle-2.JPG", "aigle-3.JPG"],
    },
    SeedEntry {
        title: "L'Homme-Ange",
        description: "Série de sculptures explorant la dualité entre l'humain et le divin. Chaque pièce représente une étape de cette transformation spirituelle, créée avec des techniques traditionnelles de forge.",
        images: &[
            "homme-ange-1.JPG",
            "homme-ange-2.jpg",
            "homme-ange-3.jpg",
            "homme-ange-4.jpg",
            "homme-ange-5.jpg",
        ],
    },
    SeedEntry {
        title: "Les Roses de Fer",
        description: "Délicates roses en fer forgé, alliant la fragilité apparente de la fleur à la solidité du métal. Un contraste poétique entre la nature éphémère et la permanence de l'art.",
        images: &["rose.JPG", "roses-petites.JPG"],
    },
    SeedEntry {
        title: "Cœur Ailé",
        description: "Sculpture symbolique représentant un cœur ailé, fusion de l'amour terrestre et de l'élévation spirituelle. Pièce unique créée avec des techniques de forge traditionnelles.",
        images: &["coeur_aile.jpeg"],
    },
    SeedEntry {
        title: "L'Arbre des Rêves",
        description: "Arbre métallique aux branches entrelacées, symbolisant la croissance des aspirations et la force des racines. Chaque branche raconte une histoire, chaque feuille porte un espoir.",
        images: &["arbre-des-reves.jpg"],
    },
    SeedEntry {
        title: "L'Ange Gardien",
        description: "Sculpture d'ange protecteur en fer forgé, créée avec une attention particulière aux détails des ailes et de l'expression. Une présence bienveillante qui veille et protège.",
        images: &["ange.JPG"],
    },
    SeedEntry {
        title: "Le Vélo de Fer",
        description: "Vélo entièrement réalisé en fer forgé, mélange audacieux entre mobilité et solidité. Une pièce unique qui défie les conventions et célèbre l'ingéniosité humaine.",
        images: &["velo.JPG"],
    },
    SeedEntry {
        title: "La Guitare Métallique",
        description: "Guitare sculpturale en fer forgé, fusion parfaite entre musique et métal. Chaque corde, chaque détail est méticuleusement travaillé pour créer une œuvre d'art sonore et visuelle.",
        images: &["guitare.JPG"],
    },
    SeedEntry {
        title: "La Mie Dorée",
        description: "Sculpture abstraite en fer forgé évoquant la chaleur et la douceur du pain frais. Les courbes organiques du métal créent un contraste saisissant avec la rigidité apparente du fer.",
        images: &["mie-doree.JPG"],
    },
];

const FITTINGS: &[SeedEntry] = &[
    SeedEntry {
        title: "Barreaux de Fenêtres",
        description: "Barreaux de sécurité élégants pour fenêtres, alliant protection et esthétique. Réalisés en fer forgé avec des motifs traditionnels qui s'intègrent parfaitement à l'architecture existante.",
        images: &["barreaux-fenetres-1.jpeg", "barreaux-fenetres-2.jpeg"],
    },
    SeedEntry {
        title: "Berceau Métallique",
        description: "Berceau décoratif en fer forgé, parfait pour agrémenter un jardin ou une terrasse. Design épuré et moderne qui apporte une touche d'élégance à l'espace extérieur.",
        images: &["berceau.JPG"],
    },
    SeedEntry {
        title: "Escalier Extérieur",
        description: "Escalier extérieur en fer forgé avec garde-corps intégré. Conçu pour résister aux intempéries tout en conservant un design raffiné et une sécurité optimale.",
        images: &["escalier-exterieur-1.jpeg", "escalier-exterieur-2.jpeg"],
    },
    SeedEntry {
        title: "Escalier Principal",
        description: "Escalier principal avec rampe en fer forgé, alliant fonctionnalité et esthétique. Chaque marche et chaque barreau sont travaillés avec précision pour créer un ensemble harmonieux.",
        images: &["escalier.jpg"],
    },
    SeedEntry {
        title: "Garde-corps Intérieur",
        description: "Garde-corps intérieur moderne en fer forgé, finition grise élégante. Parfait pour sécuriser les escaliers et mezzanines tout en conservant la luminosité et l'ouverture de l'espace.",
        images: &[
            "garde-du-corps-interieur-gris-1.jpeg",
            "garde-du-corps-interieur-gris-2.jpeg",
            "garde-du-corps-interieur-gris-3.jpeg",
        ],
    },
    SeedEntry {
        title: "Grillage de Fenêtre",
        description: "Grillage décoratif pour fenêtre en fer forgé, combinant sécurité et esthétique. Motifs géométriques qui filtrent la lumière tout en protégeant l'intimité.",
        images: &["grillage-fenetre.JPG"],
    },
    SeedEntry {
        title: "Marquise et Porte avec Barreaux",
        description: "Ensemble complet marquise, porte et barreaux de fenêtre en finition verte. Solution complète qui unifie l'apparence de la façade tout en apportant protection et style.",
        images: &[
            "marquise-et-porte-et-barreaux-fenetre-verts-1.jpg",
            "marquise-et-porte-et-barreaux-fenetre-verts-2.jpg",
            "marquise-et-porte-et-barreaux-fenetre-verts-3.jpg",
        ],
    },
    SeedEntry {
        title: "Marquises de Protection",
        description: "Marquises en fer forgé pour protéger l'entrée des intempéries. Design épuré et moderne qui s'intègre parfaitement à l'architecture contemporaine.",
        images: &["marquises-1.jpeg", "marquises-2.jpeg"],
    },
    SeedEntry {
        title: "Portail Blanc",
        description: "Portail élégant en fer forgé avec finition blanche. Design classique et intemporel qui apporte une touche de raffinement à l'entrée de propriété.",
        images: &["portail-blanc.JPG"],
    },
    SeedEntry {
        title: "Portail Coulissant Noir",
        description: "Portail coulissant moderne en fer forgé, finition noire sophistiquée. Système d'ouverture fluide et sécurisé, parfait pour les entrées de garage ou de cour.",
        images: &[
            "portail-coulissant-noir-1.jpg",
            "portail-coulissant-noir-2.jpg",
            "portail-coulissant-noir-3.jpg",
        ],
    },
    SeedEntry {
        title: "Portail Coulissant Classique",
        description: "Portail coulissant traditionnel en fer forgé. Mécanisme robuste et fiable, design classique qui s'adapte à tous les styles architecturaux.",
        images: &["portail-coullissant.jpeg"],
    },
    SeedEntry {
        title: "Portail Kaki",
        description: "Portail en fer forgé avec finition kaki, couleur discrète et élégante. Parfait pour s'intégrer harmonieusement dans un environnement naturel.",
        images: &["portail-kaki-2.JPG", "portail-kaki.JPG"],
    },
    SeedEntry {
        title: "Portail Noir",
        description: "Portail imposant en fer forgé, finition noire moderne. Design contemporain qui allie sécurité et esthétique pour une entrée de propriété remarquable.",
        images: &["portail-noir-1.JPG", "portail-noir-2.JPG"],
    },
    SeedEntry {
        title: "Portail Vert",
        description: "Portail en fer forgé avec finition verte, couleur naturelle et apaisante. S'intègre parfaitement dans un environnement paysager ou urbain.",
        images: &["portail-vert-fonce.JPG", "portail-vert.JPG"],
    },
    SeedEntry {
        title: "Portes Intérieures",
        description: "Portes intérieures en fer forgé avec vitrage décoratif. Allient intimité et luminosité, parfaites pour séparer les espaces tout en conservant la transparence.",
        images: &[
            "porte-interieur-1.jpg",
            "porte-interieur-2.jpg",
            "porte-interieur-3.jpg",
        ],
    },
    SeedEntry {
        title: "Portes de Jardin",
        description: "Portes de jardin en fer forgé, design rustique et charmant. Parfaites pour délimiter les espaces extérieurs tout en conservant la vue sur le jardin.",
        images: &["porte-jardin-1.jpg", "porte-jardin-2.jpg", "porte-jardin-3.jpg"],
    },
    SeedEntry {
        title: "Rembardes de Sécurité",
        description: "Rembardes de sécurité en fer forgé pour balcons et terrasses. Allient protection et esthétique avec des motifs traditionnels élégants.",
        images: &["rembarde-1.jpeg", "rembarde-2.jpeg"],
    },
    SeedEntry {
        title: "Rembarde de Balcon",
        description: "Rembarde de balcon en fer forgé, design moderne et épuré. Sécurise l'espace tout en conservant la vue panoramique et la luminosité.",
        images: &["rembarde-balcon.JPG"],
    },
    SeedEntry {
        title: "Rembarde d'Escalier avec Garde-corps",
        description: "Ensemble rembarde et garde-corps d'escalier en fer forgé. Sécurité optimale avec un design harmonieux qui suit les courbes de l'escalier.",
        images: &[
            "rembarde-escalier-et-garde-du-corps-1.jpeg",
            "rembarde-escalier-et-garde-du-corps-2.jpeg",
            "rembarde-escalier-et-garde-du-corps-3.jpeg",
        ],
    },
    SeedEntry {
        title: "Rembardes d'Escalier Intérieur",
        description: "Rembardes d'escalier intérieur en fer forgé, finition raffinée. Sécurisent les escaliers tout en conservant l'élégance et la luminosité de l'espace.",
        images: &[
            "rembarde-escalier-interieur-1.JPG",
            "rembarde-escalier-interieur-2.JPG",
            "rembarde-escalier-interieur-3.JPG",
            "rembarde-escalier-interieur-4.JPG",
        ],
    },
    SeedEntry {
        title: "Rembardes d'Étage",
        description: "Rembardes d'étage en fer forgé, design contemporain et sécurisé. Parfaites pour les mezzanines et les espaces surélevés.",
        images: &["rembarde-etage-1.jpg", "rembarde-etage-2.jpg"],
    },
    SeedEntry {
        title: "Rembardes Intérieures",
        description: "Rembardes intérieures en fer forgé, motifs variés et élégants. Sécurisent les espaces tout en ajoutant une touche décorative raffinée.",
        images: &[
            "rembarde-interieur-1.JPG",
            "rembarde-interieur-2.JPG",
            "rembarde-interieur-3.JPG",
            "rembarde-interieur-4.JPG",
            "rembarde-interieur-5.JPG",
        ],
    },
    SeedEntry {
        title: "Rembardes de Terrasse",
        description: "Rembardes de terrasse en fer forgé, résistantes aux intempéries. Design moderne qui sécurise l'espace extérieur tout en conservant la vue.",
        images: &["rembarde-terrasse-1.jpg", "rembarde-terrasse-2.jpg"],
    },
    SeedEntry {
        title: "Repose-main d'Escalier",
        description: "Repose-main d'escalier intérieur en fer forgé, ergonomie et esthétique. Confort d'utilisation avec un design raffiné qui s'intègre parfaitement.",
        images: &["repose-main-d-escalier-interieur.jpeg"],
    },
    SeedEntry {
        title: "Support de Plante Murale",
        description: "Support de plante murale en fer forgé, design élégant et fonctionnel. Parfait pour suspendre des jardinières et créer un jardin vertical.",
        images: &["support_plante_murale.JPG"],
    },
    SeedEntry {
        title: "Support de Plante Grimpante",
        description: "Support de plante grimpante extérieur en fer forgé. Structure robuste qui guide et supporte les plantes grimpantes pour créer un mur végétal naturel.",
        images: &["support-plante-grimpante-exterieure.jpeg"],
    },
    SeedEntry {
        title: "Support de Pots de Fleurs",
        description: "Support de pots de fleurs en fer forgé, design créatif et fonctionnel. Élève les plantes pour créer des compositions florales attrayantes.",
        images: &["support-pots-de-fleurs.jpeg"],
    },
    SeedEntry {
        title: "Tables Intérieures",
        description: "Série de tables intérieures en fer forgé, design moderne et fonctionnel. Parfaites pour agrémenter l'espace intérieur avec style et élégance.",
        images: &[
            "tables-interieures-serie-1.jpg",
            "tables-interieures-serie-2.jpg",
            "tables-interieures-serie-3.jpg",
        ],
    },
];

impl SeedEntry {
    fn draft(&self) -> GalleryEntryDraft {
        GalleryEntryDraft {
            title: self.title.to_string(),
            description: self.description.to_string(),
            images: self.images.iter().map(|image| image.to_string()).collect(),
        }
    }
}

/// Entries in insertion order. Art pieces are inserted last-first so the
/// newest-first listing shows them in catalogue order.
pub fn default_entries(category: Category) -> Vec<GalleryEntryDraft> {
    match category {
        Category::Art => ART.iter().rev().map(SeedEntry::draft).collect(),
        Category::Fittings => FITTINGS.iter().map(SeedEntry::draft).collect(),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped_categories: Vec<Category>,
    pub recipient: String,
}

/// Inserts the default entries into every empty category and makes sure a
/// notification recipient exists.
pub async fn seed_database(db: &DatabaseContext) -> Result<SeedReport> {
    let gallery = db.gallery();
    let mut report = SeedReport::default();

    for category in Category::ALL {
        if gallery.count(category).await? > 0 {
            info!(%category, "gallery already populated, skipping seed");
            report.skipped_categories.push(category);
            continue;
        }
        for draft in default_entries(category) {
            let entry = gallery.create(category, draft).await?;
            info!(%category, id = entry.id, title = %entry.title, "seeded entry");
            report.inserted += 1;
        }
    }

    report.recipient = db.recipients().ensure_default(DEFAULT_RECIPIENT).await?.email;
    Ok(report)
}
