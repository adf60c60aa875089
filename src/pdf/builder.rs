use crate::error::{ExtractError, Result};
use crate::pdf::PdfDocument;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Object types that are never copied along with a page. References to them become null.
const PAGE_TREE_TYPES: [&[u8]; 3] = [b"Page", b"Pages", b"Catalog"];

/// A new PDF assembled from pages copied out of a source document.
///
/// Objects shared between copied pages (fonts, images) are copied once. A builder is meant to
/// copy from a single source document.
pub struct PdfBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    copied: HashMap<ObjectId, ObjectId>,
}

impl PdfBuilder {
    pub fn create_empty() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        PdfBuilder {
            doc,
            pages_id,
            kids: Vec::new(),
            copied: HashMap::new(),
        }
    }

    /// Copy the page at a 0-based index, with everything it references, into this document.
    ///
    /// The copy is not part of the page tree until it is passed to [`PdfBuilder::append_page`].
    pub fn copy_page_from(&mut self, source: &PdfDocument, index: u32) -> Result<ObjectId> {
        let page_id = source.page_id(index)?;
        let mut page = source
            .doc
            .get_dictionary(page_id)
            .map_err(|e| {
                ExtractError::ExtractionFailure(format!("page {}: {}", index + 1, e))
            })?
            .clone();

        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = find_inherited(&source.doc, page_id, key) {
                page.set(key, value.clone());
            }
        }
        page.remove(b"Parent");

        let new_id = self.doc.new_object_id();
        self.copied.insert(page_id, new_id);
        let page = self.copy_dictionary(&source.doc, &page);
        self.doc.objects.insert(new_id, Object::Dictionary(page));

        tracing::trace!(page = index + 1, ?page_id, ?new_id, "copied page");
        Ok(new_id)
    }

    pub fn append_page(&mut self, page_id: ObjectId) {
        self.kids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Build the page tree and catalog, then write the document out.
    pub fn serialize(mut self) -> Result<Vec<u8>> {
        for &kid in &self.kids {
            if let Ok(page) = self.doc.get_dictionary_mut(kid) {
                page.set("Parent", self.pages_id);
            }
        }

        let kids: Vec<Object> = self.kids.iter().map(|&id| id.into()).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.kids.len() as i64,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer).map_err(|e| {
            ExtractError::ExtractionFailure(format!("failed to serialize document: {}", e))
        })?;
        Ok(buffer)
    }

    fn copy_object(&mut self, source: &Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self.copy_reference(source, *id),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(source, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(source, dict)),
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.copy_dictionary(source, &stream.dict);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, source: &Document, dict: &Dictionary) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            copied.set(key.clone(), self.copy_object(source, value));
        }
        copied
    }

    fn copy_reference(&mut self, source: &Document, id: ObjectId) -> Object {
        if let Some(&new_id) = self.copied.get(&id) {
            return Object::Reference(new_id);
        }

        // A reference to a missing object is equivalent to null.
        let object = match source.get_object(id) {
            Ok(object) => object,
            Err(_) => return Object::Null,
        };

        // Links to other pages or to the page tree would drag the whole source along.
        if is_page_tree_node(object) {
            return Object::Null;
        }

        let new_id = self.doc.new_object_id();
        self.copied.insert(id, new_id);
        let copied = self.copy_object(source, object);
        self.doc.objects.insert(new_id, copied);
        Object::Reference(new_id)
    }
}

fn is_page_tree_node(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    match dict.get(b"Type").and_then(Object::as_name) {
        Ok(name) => PAGE_TREE_TYPES.contains(&name),
        Err(_) => false,
    }
}

fn find_inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut seen = HashSet::new();
    let mut current = doc.get_dictionary(page_id).ok()?;

    loop {
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        if !seen.insert(parent_id) {
            return None;
        }

        let parent = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = parent.get(key) {
            return Some(value);
        }
        current = parent;
    }
}
