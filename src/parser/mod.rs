pub mod arguments;
pub mod description;
pub mod dom;
pub mod extract;
pub mod markdown;
pub mod returns;
pub mod sections;

use scraper::Html;
use tracing::{debug, info};

use crate::build_info::BuildInfo;
use crate::error::ParseError;
use crate::schema::Schema;
use sections::{Mode, SectionKind};

/// Reference pass, then changelog pass, into a fresh schema.
pub fn build_schema(
    reference_html: &str,
    changelog_html: &str,
    build_info: BuildInfo,
) -> Result<Schema, ParseError> {
    let mut schema = Schema::new(build_info);
    process_document(&mut schema, reference_html, Mode::Reference)?;
    info!("Built schema for Bot API version {}", schema.version);
    process_document(&mut schema, changelog_html, Mode::Changelog)?;
    Ok(schema)
}

/// Segment one page and add every classified section to `schema`.
pub fn process_document(schema: &mut Schema, html: &str, mode: Mode) -> Result<(), ParseError> {
    let document = Html::parse_document(html);

    if mode == Mode::Reference {
        schema.version = extract::version(&document)?;
    }

    for section in sections::segment(&document)? {
        match sections::classify(&section.title, &section.category, mode) {
            SectionKind::Changelog => {
                info!("Adding changelog {}", section.title);
                let entry = extract::changelog(&section);
                schema.changelogs.insert(section.title, entry);
            }
            SectionKind::Article => {
                let (id, article) = extract::article(&section)?;
                info!("Adding article {} of category {}", section.title, section.category);
                schema.articles.insert(id, article);
            }
            SectionKind::Method => {
                let method = extract::method(&section)?;
                info!("Adding method {} of category {}", section.title, section.category);
                schema.methods.insert(section.title, method);
            }
            SectionKind::Type => {
                let type_ = extract::type_(&section)?;
                info!("Adding type {} of category {}", section.title, section.category);
                schema.types.insert(section.title, type_);
            }
            SectionKind::Skipped => debug!("Skipped {:?}", section.title),
        }
    }

    Ok(())
}

// ── Tests ──
