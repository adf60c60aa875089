use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

fn text_block(size: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), size.into()]),
        Operation::new("Td", vec![72.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn build(page_count: u32, title: Option<&str>, encrypted: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in 1..=page_count {
        let mut operations = text_block(24, 720, &format!("Page {} heading", page));
        operations.extend(text_block(12, 680, &format!("Body of page {}", page)));
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    // Resources and MediaBox live on the page tree root and are inherited by every page.
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", info_id);
    }

    if encrypted {
        // Standard security handler, RC4 40-bit. The keys are placeholders, so no password
        // opens this document.
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 1,
            "R" => 2,
            "O" => Object::string_literal(vec![0x11u8; 32]),
            "U" => Object::string_literal(vec![0x22u8; 32]),
            "P" => -4,
        });
        doc.trailer.set("Encrypt", encrypt_id);
        doc.trailer.set(
            "ID",
            Object::Array(vec![
                Object::string_literal(vec![0x33u8; 16]),
                Object::string_literal(vec![0x33u8; 16]),
            ]),
        );
    }

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// An in-memory PDF where page N shows "Page N heading" and "Body of page N"
pub fn sample_pdf(page_count: u32) -> Vec<u8> {
    build(page_count, None, false)
}

pub fn sample_pdf_with_info(page_count: u32) -> Vec<u8> {
    build(page_count, Some("Sample Title"), false)
}

/// Like [`sample_pdf`], but with an `Encrypt` entry in the trailer
pub fn encrypted_pdf(page_count: u32) -> Vec<u8> {
    build(page_count, None, true)
}
