//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::get_tag_name;
///
/// let xml = r#"<billStatus><bill>text</bill></billStatus>"#;
/// let doc = Document::parse(xml).unwrap();
/// let bill = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(bill), "bill");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// Only immediate children are searched, never deeper descendants.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::find_child;
///
/// let xml = r#"<bill><number>1</number><type>hr</type></bill>"#;
/// let doc = Document::parse(xml).unwrap();
/// let bill = doc.root_element();
///
/// assert!(find_child(bill, "number").is_some());
/// assert!(find_child(bill, "billNumber").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find the first child element with the given namespace URI and local name.
pub fn find_child_ns<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| {
        child.is_element()
            && child.tag_name().namespace() == Some(namespace)
            && get_tag_name(*child) == tag
    })
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::find_children;
///
/// let xml = r#"<actions><item>1</item><count>2</count><item>2</item></actions>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let items: Vec<_> = find_children(doc.root_element(), "item").collect();
/// assert_eq!(items.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a descendant element matching a path of tag names.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated path of tag names (e.g., "policyArea/name")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::find_by_path;
///
/// let xml = r#"<bill><policyArea><name>Taxation</name></policyArea></bill>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let name = find_by_path(doc.root_element(), "policyArea/name");
/// assert_eq!(name.and_then(|n| n.text()), Some("Taxation"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;

    for part in path.split('/') {
        current = find_child(current, part)?;
    }

    Some(current)
}

/// Get the text of an optional element, exactly as it appears in the source.
///
/// Returns `None` when the element is absent or has no text. Whitespace is
/// not trimmed; callers that need trimming do it themselves.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::{find_child, text_or_none};
///
/// let xml = r#"<item><name> Finance </name></item>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element();
///
/// assert_eq!(text_or_none(find_child(item, "name")), Some(" Finance "));
/// assert_eq!(text_or_none(find_child(item, "date")), None);
/// ```
pub fn text_or_none<'a>(node: Option<Node<'a, '_>>) -> Option<&'a str> {
    node.and_then(|n| n.text())
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Get all element children of a node (excludes text nodes, comments, etc.).
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Tag names of all element children, in document order.
pub fn child_tags<'a>(node: Node<'a, '_>) -> Vec<&'a str> {
    element_children(node).map(get_tag_name).collect()
}

/// Assert that a container element has the expected tag.
///
/// A mismatch means the caller handed a parser the wrong subtree, which is a
/// programming error rather than malformed input.
///
/// # Panics
/// Panics when `node` is not a `<tag>` element.
pub fn expect_tag(node: Node<'_, '_>, tag: &str) {
    assert!(
        has_tag(node, tag),
        "expected <{tag}> element, got <{}> at {}",
        get_tag_name(node),
        node_path(node)
    );
}

/// Slash-separated path of element names from the document root to `node`.
///
/// Used as error and log context, e.g. `billStatus/bill/actions/item`.
pub fn node_path(node: Node<'_, '_>) -> String {
    let mut names: Vec<&str> = node
        .ancestors()
        .filter(|n| n.is_element())
        .map(get_tag_name)
        .collect();
    names.reverse();
    names.join("/")
}

/// Iterate over the `item_tag` children of an optional container.
///
/// An absent container yields nothing. A present container must carry
/// `container_tag` (see [`expect_tag`]); children with any other tag,
/// including stray text nodes, are skipped.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use congress_harvester::xml::items;
///
/// let xml = r#"<laws><item/><count>1</count></laws>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// assert_eq!(items(Some(doc.root_element()), "laws", "item").count(), 1);
/// assert_eq!(items(None, "laws", "item").count(), 0);
/// ```
pub fn items<'a, 'input>(
    container: Option<Node<'a, 'input>>,
    container_tag: &str,
    item_tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    if let Some(node) = container {
        expect_tag(node, container_tag);
    }
    container
        .into_iter()
        .flat_map(move |node| find_children(node, item_tag))
}
