use super::DomTree;
use crate::selector::Selector;

/// Collects all descendants of `scope` matching `selector` in tree order.
///
/// Shadow trees attached to descendants are opaque: their content is only
/// reachable by querying the shadow root itself.
pub fn query_selector_all<T>(tree: &T, scope: T::Node, selector: &Selector) -> Vec<T::Node>
where
    T: DomTree + ?Sized,
{
    let mut matches = Vec::new();
    collect_matches(tree, scope, selector, &mut matches);
    matches
}

/// First descendant of `scope` matching `selector`.
pub fn query_selector<T>(tree: &T, scope: T::Node, selector: &Selector) -> Option<T::Node>
where
    T: DomTree + ?Sized,
{
    find_first(tree, scope, selector)
}

fn collect_matches<T>(tree: &T, node: T::Node, selector: &Selector, matches: &mut Vec<T::Node>)
where
    T: DomTree + ?Sized,
{
    for child in tree.children(node) {
        if selector.matches(tree, child) {
            matches.push(child);
        }
        collect_matches(tree, child, selector, matches);
    }
}

fn find_first<T>(tree: &T, node: T::Node, selector: &Selector) -> Option<T::Node>
where
    T: DomTree + ?Sized,
{
    for child in tree.children(node) {
        if selector.matches(tree, child) {
            return Some(child);
        }
        if let Some(found) = find_first(tree, child, selector) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tree::TestTree;
    use rstest::{fixture, rstest};

    struct Page {
        tree: TestTree,
        first: usize,
        second: usize,
        host: usize,
        inner: usize,
    }

    #[fixture]
    fn page() -> Page {
        let mut tree = TestTree::new();
        let body = tree.element(0, "body", &[]);
        let first = tree.element(body, "div", &["item"]);
        let host = tree.element(body, "c-list", &[]);
        let second = tree.element(host, "div", &["item"]);
        let root = tree.shadow(host);
        let inner = tree.element(root, "div", &["item"]);
        Page { tree, first, second, host, inner }
    }

    #[rstest]
    fn matches_are_returned_in_tree_order(page: Page) {
        let found = query_selector_all(&page.tree, 0, &Selector::parse("div.item"));
        assert_eq!(found, vec![page.first, page.second]);
    }

    #[rstest]
    fn shadow_content_is_not_visible_from_outside(page: Page) {
        let found = query_selector_all(&page.tree, 0, &Selector::parse("div.item"));
        assert!(!found.contains(&page.inner));
    }

    #[rstest]
    fn querying_the_shadow_root_reaches_its_content(page: Page) {
        let root = page.tree.shadow_root(page.host).expect("shadow root");
        let found = query_selector_all(&page.tree, root, &Selector::parse("div"));
        assert_eq!(found, vec![page.inner]);
    }

    #[rstest]
    fn scope_itself_is_excluded(page: Page) {
        let found = query_selector_all(&page.tree, page.host, &Selector::parse("c-list"));
        assert!(found.is_empty());
    }

    #[rstest]
    fn query_selector_returns_first_match(page: Page) {
        assert_eq!(query_selector(&page.tree, 0, &Selector::parse("div")), Some(page.first));
        assert_eq!(query_selector(&page.tree, 0, &Selector::parse("span")), None);
    }
}
