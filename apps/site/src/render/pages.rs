use std::fmt::Write;

use chrono::{Datelike, Utc};

use crate::careers::{CareerRecord, Contact, Item, ItemValue, Section};
use crate::render::format::{escape_html, format_date, render_value, FALSE_GLYPH, TRUE_GLYPH};

pub const SITE_NAME: &str = "マイネクストキャリア";
const SITE_TAGLINE: &str = "エンジニアが次の職場に求める条件を掲載できるサイト";

const ABOUT_SECTION: &str = "<section class=\"about\">
<h2>サイトについて</h2>
<p>「マイネクストキャリア」は、エンジニアが次のキャリアに求める条件を明確にし、共有するためのプラットフォームです。\
自分の希望条件を整理して公開することで、条件にマッチする企業とのミスマッチを減らし、より良いキャリア選択をサポートします。</p>
<p>技術スタック、勤務形態、報酬など、あなたが重視する条件を明確にして、理想的な次のキャリアへの一歩を踏み出しましょう。</p>
</section>
";

/// List page: the site intro, then one card per record linking to its
/// detail page.
pub fn render_list_page(records: &[CareerRecord]) -> String {
    let mut body = String::from(ABOUT_SECTION);
    body.push_str("<section class=\"career-list\">\n<h2>キャリア一覧</h2>\n");
    if records.is_empty() {
        body.push_str("<p class=\"empty\">掲載中のキャリアはありません</p>\n");
    }
    for record in records {
        let id = escape_html(&record.id);
        let _ = writeln!(
            body,
            "<a class=\"career-card\" href=\"/careers/{id}/\" data-testid=\"career-card-{id}\">"
        );
        let _ = writeln!(body, "<h3>{}</h3>", escape_html(&record.title));
        let _ = writeln!(
            body,
            "<p class=\"last-update\">最終更新: {}</p>",
            escape_html(&format_date(&record.last_update))
        );
        body.push_str("<ul class=\"section-titles\">\n");
        for section in &record.sections {
            let _ = writeln!(body, "<li>{}</li>", escape_html(&section.title));
        }
        body.push_str("</ul>\n</a>\n");
    }
    body.push_str("</section>\n");
    layout(SITE_NAME, &body)
}

/// Detail page for one record: sections as tables, then the contact block.
pub fn render_detail_page(record: &CareerRecord) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape_html(&record.title));
    let _ = writeln!(
        body,
        "<p class=\"last-update\">最終更新: {}</p>",
        escape_html(&format_date(&record.last_update))
    );
    for section in &record.sections {
        render_section(&mut body, section);
    }
    if let Some(contact) = &record.contact {
        render_contact(&mut body, contact);
    }
    body.push_str("<p><a href=\"/\">一覧へ戻る</a></p>\n");
    layout(&format!("{} | {SITE_NAME}", record.title), &body)
}

pub fn render_not_found_page() -> String {
    layout(
        &format!("キャリアが見つかりません | {SITE_NAME}"),
        "<h1>キャリアが見つかりません</h1>\n<p><a href=\"/\">一覧へ戻る</a></p>\n",
    )
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str("<section class=\"career-section\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&section.title));
    out.push_str("<table>\n<thead><tr><th>項目</th><th>内容</th></tr></thead>\n<tbody>\n");
    for item in &section.items {
        render_item(out, item);
    }
    out.push_str("</tbody>\n</table>\n</section>\n");
}

fn render_item(out: &mut String, item: &Item) {
    if item.is_required() {
        out.push_str("<tr class=\"must-have\">");
    } else {
        out.push_str("<tr>");
    }
    let _ = write!(out, "<th>{}", escape_html(&item.key));
    if item.is_required() {
        out.push_str("<span class=\"badge\">必須</span>");
    }
    out.push_str("</th><td>");
    match &item.value {
        ItemValue::Boolean(true) => {
            let _ = write!(out, "<span class=\"yes\">{TRUE_GLYPH}</span>");
        }
        ItemValue::Boolean(false) => {
            let _ = write!(out, "<span class=\"no\">{FALSE_GLYPH}</span>");
        }
        ItemValue::List(values) => {
            out.push_str("<ul>");
            for value in values {
                let _ = write!(out, "<li>{}</li>", escape_html(value));
            }
            out.push_str("</ul>");
        }
        ItemValue::Number(_) | ItemValue::Text(_) => {
            let _ = write!(out, "<span>{}</span>", escape_html(&render_value(&item.value)));
        }
    }
    out.push_str("</td></tr>\n");
}

fn render_contact(out: &mut String, contact: &Contact) {
    out.push_str("<section class=\"contact\">\n<h3>連絡先</h3>\n<table>\n<tbody>\n");
    if let Some(email) = &contact.email {
        let email = escape_html(email);
        contact_row(out, "メール", &format!("mailto:{email}"), &email, "email-link");
    }
    if let Some(handle) = &contact.twitter {
        let handle = escape_html(handle);
        contact_row(
            out,
            "Twitter",
            &format!("https://twitter.com/{handle}"),
            &format!("@{handle}"),
            "twitter-link",
        );
    }
    if let Some(handle) = &contact.linkedin {
        contact_row(
            out,
            "LinkedIn",
            &format!("https://www.linkedin.com/in/{}", escape_html(handle)),
            "LinkedIn",
            "linkedin-link",
        );
    }
    if let Some(handle) = &contact.github {
        contact_row(
            out,
            "GitHub",
            &format!("https://github.com/{}", escape_html(handle)),
            "GitHub",
            "github-link",
        );
    }
    out.push_str("</tbody>\n</table>\n</section>\n");
}

// `href` and `label` must already be escaped.
fn contact_row(out: &mut String, kind: &str, href: &str, label: &str, test_id: &str) {
    let external = if href.starts_with("mailto:") {
        ""
    } else {
        " target=\"_blank\" rel=\"noopener noreferrer\""
    };
    let _ = writeln!(
        out,
        "<tr><td>{kind}</td><td><a href=\"{href}\"{external} data-testid=\"{test_id}\">{label}</a></td></tr>"
    );
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header>
<a href="/"><strong>{SITE_NAME}</strong></a>
<p>{SITE_TAGLINE}</p>
</header>
<main>
{body}</main>
<footer>
<p>&copy; {year} {SITE_NAME}</p>
</footer>
</body>
</html>
"#,
        title = escape_html(title),
        year = Utc::now().year(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CareerRecord {
        CareerRecord {
            id: "ios-engineer".to_string(),
            title: "iOSアプリエンジニア".to_string(),
            last_update: "2025-04-13".to_string(),
            sections: vec![Section {
                title: "技術について".to_string(),
                items: vec![
                    Item {
                        key: "Swiftを使用している".to_string(),
                        value: ItemValue::Boolean(true),
                        must_have: Some(true),
                    },
                    Item {
                        key: "Objective-C".to_string(),
                        value: ItemValue::Boolean(false),
                        must_have: None,
                    },
                    Item {
                        key: "言語".to_string(),
                        value: ItemValue::List(vec!["Swift".into(), "Kotlin".into()]),
                        must_have: None,
                    },
                    Item {
                        key: "<script>".to_string(),
                        value: ItemValue::Text("a & b".into()),
                        must_have: None,
                    },
                ],
            }],
            contact: Some(Contact {
                email: Some("yamada@example.com".into()),
                twitter: Some("yamada_ios".into()),
                linkedin: None,
                github: Some("yamada-dev".into()),
            }),
        }
    }

    #[test]
    fn test_list_page_links_each_record() {
        let html = render_list_page(&[record()]);
        assert!(html.contains("href=\"/careers/ios-engineer/\""));
        assert!(html.contains("<h3>iOSアプリエンジニア</h3>"));
        assert!(html.contains("最終更新: 2025年04月13日"));
        assert!(html.contains("<li>技術について</li>"));
    }

    #[test]
    fn test_list_page_empty() {
        assert!(render_list_page(&[]).contains("掲載中のキャリアはありません"));
    }

    #[test]
    fn test_list_page_starts_with_about_section() {
        let html = render_list_page(&[record()]);
        let about = html.find("<h2>サイトについて</h2>").unwrap();
        let list = html.find("<h2>キャリア一覧</h2>").unwrap();
        assert!(about < list);
    }

    #[test]
    fn test_detail_page_values_and_badges() {
        let html = render_detail_page(&record());
        assert!(html.contains("<title>iOSアプリエンジニア | マイネクストキャリア</title>"));
        assert!(html.contains("<tr class=\"must-have\"><th>Swiftを使用している<span class=\"badge\">必須</span>"));
        assert!(html.contains("<span class=\"yes\">◯</span>"));
        assert!(html.contains("<span class=\"no\">✗</span>"));
        assert!(html.contains("<ul><li>Swift</li><li>Kotlin</li></ul>"));
        assert_eq!(html.matches("必須").count(), 1);
    }

    #[test]
    fn test_detail_page_escapes_content() {
        let html = render_detail_page(&record());
        assert!(html.contains("<th>&lt;script&gt;</th>"));
        assert!(html.contains("<span>a &amp; b</span>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_detail_page_contact_links() {
        let html = render_detail_page(&record());
        assert!(html.contains("href=\"mailto:yamada@example.com\""));
        assert!(html.contains("href=\"https://twitter.com/yamada_ios\""));
        assert!(html.contains(">@yamada_ios</a>"));
        assert!(html.contains("href=\"https://github.com/yamada-dev\""));
        assert!(!html.contains("linkedin-link"));
    }

    #[test]
    fn test_detail_page_without_contact() {
        let mut r = record();
        r.contact = None;
        assert!(!render_detail_page(&r).contains("連絡先"));
    }

    #[test]
    fn test_not_found_page() {
        assert!(render_not_found_page().contains("キャリアが見つかりません"));
    }
}
