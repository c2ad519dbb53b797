//! Parsed representation of one device configuration.
//!
//! A configuration is hierarchical plain text: nesting is encoded purely by
//! leading-whitespace indentation, the way network operating systems print
//! `show running-config`. The tree is an arena of nodes in file order; a
//! node's children are the directly deeper lines beneath it.

use thiserror::Error;

/// Index of a node within its [`ConfigTree`] arena.
///
/// Nodes are appended in file order, so id order and pre-order traversal
/// coincide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How raw text becomes a tree.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Keep blank lines as zero-width nodes at depth 0. A kept blank line
    /// closes the current block and is never a parent. When false, blank
    /// lines are dropped before tree construction.
    pub keep_blank_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_blank_lines: true,
        }
    }
}

/// Malformed input the builder refuses to guess at.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The file indents with both tabs and spaces. There is no principled
    /// depth equivalence between the two, so the input is rejected.
    #[error("mixed tab and space indentation at line {line}")]
    MixedIndentation { line: usize },
}

#[derive(Clone, Debug)]
struct NodeData {
    /// Line text with indentation stripped; depth is kept separately.
    text: String,
    /// Number of leading whitespace characters on the source line.
    indent: usize,
    /// 1-based source line number. Unique within a tree.
    line: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The parsed, queryable configuration of one device.
///
/// Immutable once built: re-parsing the same text always produces a
/// structurally identical tree.
#[derive(Clone, Debug, Default)]
pub struct ConfigTree {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IndentStyle {
    Unknown,
    Spaces,
    Tabs,
}

impl ConfigTree {
    /// Build a tree from raw configuration text.
    ///
    /// The builder never rejects malformed depth jumps: any depth increase
    /// attaches to the nearest shallower line. Only mixed tab/space
    /// indentation is refused.
    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let mut tree = ConfigTree::default();
        // (indent, id) for the current chain of open blocks.
        let mut stack: Vec<(usize, NodeId)> = Vec::new();
        let mut style = IndentStyle::Unknown;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim_end();

            if raw.trim_start().is_empty() {
                if options.keep_blank_lines {
                    // Zero-width node at depth 0: closes the block chain and
                    // never parents anything.
                    stack.clear();
                    let id = tree.push(NodeData {
                        text: String::new(),
                        indent: 0,
                        line,
                        parent: None,
                        children: Vec::new(),
                    });
                    tree.roots.push(id);
                }
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            style = check_indent(&raw[..indent], style, line)?;
            let text = raw[indent..].to_string();

            while stack.last().is_some_and(|&(depth, _)| depth >= indent) {
                stack.pop();
            }
            let parent = stack.last().map(|&(_, id)| id);

            let id = tree.push(NodeData {
                text,
                indent,
                line,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => tree.nodes[p.index()].children.push(id),
                None => tree.roots.push(id),
            }
            stack.push((indent, id));
        }

        Ok(tree)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    /// Root nodes (depth-0 lines) in file order.
    pub fn roots(&self) -> impl Iterator<Item = Node<'_>> {
        self.roots.iter().map(|&id| self.node(id))
    }

    /// Every node in pre-order, which is file order.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> {
        (0..self.nodes.len()).map(|i| self.node(NodeId(i)))
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

fn check_indent(indent: &str, style: IndentStyle, line: usize) -> Result<IndentStyle, ParseError> {
    if indent.is_empty() {
        return Ok(style);
    }
    let has_space = indent.contains(' ');
    let has_tab = indent.contains('\t');
    if has_space && has_tab {
        return Err(ParseError::MixedIndentation { line });
    }
    let this = if has_tab {
        IndentStyle::Tabs
    } else {
        IndentStyle::Spaces
    };
    match style {
        IndentStyle::Unknown => Ok(this),
        _ if style == this => Ok(style),
        _ => Err(ParseError::MixedIndentation { line }),
    }
}

/// Borrowed handle to one configuration line and its place in the hierarchy.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t ConfigTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Line text with indentation stripped.
    pub fn text(&self) -> &'t str {
        &self.tree.data(self.id).text
    }

    /// Number of leading whitespace characters on the source line.
    pub fn indent(&self) -> usize {
        self.tree.data(self.id).indent
    }

    /// 1-based source line number.
    pub fn line_number(&self) -> usize {
        self.tree.data(self.id).line
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    /// Direct children in file order.
    pub fn children(&self) -> impl Iterator<Item = Node<'t>> {
        self.tree
            .data(self.id)
            .children
            .iter()
            .map(|&id| self.tree.node(id))
    }

    /// This node followed by its full descendant subtree, depth-first.
    pub fn subtree(&self) -> impl Iterator<Item = Node<'t>> {
        let mut pending = vec![self.id];
        let tree = self.tree;
        std::iter::from_fn(move || {
            let id = pending.pop()?;
            let data = tree.data(id);
            pending.extend(data.children.iter().rev());
            Some(tree.node(id))
        })
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("line", &self.line_number())
            .field("indent", &self.indent())
            .field("text", &self.text())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
hostname core-sw1
interface GigabitEthernet0/1
 description to-UPLINK-sw2
 ipv6 enable
router ospf 1
 redistribute static
";

    fn parse(text: &str) -> ConfigTree {
        ConfigTree::parse(text, &ParseOptions::default()).expect("parse")
    }

    #[test]
    fn children_attach_to_nearest_shallower_line() {
        let tree = parse(SAMPLE);
        let roots: Vec<&str> = tree.roots().map(|n| n.text()).collect();
        assert_eq!(
            roots,
            vec!["hostname core-sw1", "interface GigabitEthernet0/1", "router ospf 1"]
        );

        let intf = tree.roots().nth(1).expect("interface root");
        let kids: Vec<&str> = intf.children().map(|n| n.text()).collect();
        assert_eq!(kids, vec!["description to-UPLINK-sw2", "ipv6 enable"]);
        for kid in intf.children() {
            assert!(kid.indent() > intf.indent());
            assert_eq!(kid.parent().map(|p| p.id()), Some(intf.id()));
        }
    }

    #[test]
    fn preorder_traversal_is_file_order() {
        let tree = parse(SAMPLE);
        // Walk pre-order explicitly and compare with arena order.
        let mut preorder = Vec::new();
        for root in tree.roots() {
            preorder.extend(root.subtree().map(|n| n.line_number()));
        }
        let arena: Vec<usize> = tree.iter().map(|n| n.line_number()).collect();
        assert_eq!(preorder, arena);
        assert_eq!(arena, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn line_numbers_are_unique() {
        let tree = parse(SAMPLE);
        let mut lines: Vec<usize> = tree.iter().map(|n| n.line_number()).collect();
        lines.dedup();
        assert_eq!(lines.len(), tree.len());
    }

    #[test]
    fn blank_lines_kept_as_zero_width_roots() {
        let text = "interface Gi0/1\n description up\n\nip route 0.0.0.0 0.0.0.0 10.0.0.1\n";
        let tree = parse(text);
        assert_eq!(tree.len(), 4);
        let blank = tree.iter().nth(2).expect("blank node");
        assert_eq!(blank.text(), "");
        assert_eq!(blank.indent(), 0);
        assert!(blank.parent().is_none());
        assert_eq!(blank.children().count(), 0);
    }

    #[test]
    fn blank_line_never_parents_deeper_lines() {
        let text = "interface Gi0/1\n\n ip address 10.0.0.1 255.255.255.0\n";
        let tree = parse(text);
        let ip = tree.iter().nth(2).expect("ip line");
        // The blank closed the interface block; the deeper line becomes a root.
        assert!(ip.parent().is_none());
        // File order still holds.
        let lines: Vec<usize> = tree.iter().map(|n| n.line_number()).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn blank_lines_dropped_when_disabled() {
        let text = "hostname a\n\nhostname b\n";
        let tree = ConfigTree::parse(
            text,
            &ParseOptions {
                keep_blank_lines: false,
            },
        )
        .expect("parse");
        assert_eq!(tree.len(), 2);
        // Source line numbers are preserved even when blanks are dropped.
        let lines: Vec<usize> = tree.iter().map(|n| n.line_number()).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn depth_jump_attaches_to_nearest_shallower_line() {
        let text = "router bgp 65000\n    address-family ipv4\n  neighbor 10.0.0.1\n";
        let tree = parse(text);
        let neighbor = tree.iter().nth(2).expect("neighbor");
        // Dedent to a depth never seen before: nearest shallower line is the root.
        assert_eq!(neighbor.parent().map(|p| p.text()), Some("router bgp 65000"));
    }

    #[test]
    fn mixed_indentation_is_rejected() {
        let within_one_line = "a\n \tb\n";
        let err = ConfigTree::parse(within_one_line, &ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::MixedIndentation { line: 2 });

        let across_lines = "a\n b\nc\n\td\n";
        let err = ConfigTree::parse(across_lines, &ParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::MixedIndentation { line: 4 });
    }

    #[test]
    fn tab_only_indentation_is_accepted() {
        let text = "a\n\tb\n\t\tc\n";
        let tree = parse(text);
        let c = tree.iter().nth(2).expect("c");
        assert_eq!(c.parent().map(|p| p.text()), Some("b"));
    }

    #[test]
    fn reparsing_unchanged_text_is_structurally_identical() {
        let a = parse(SAMPLE);
        let b = parse(SAMPLE);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.text(), y.text());
            assert_eq!(x.line_number(), y.line_number());
            assert_eq!(x.parent().map(|p| p.id()), y.parent().map(|p| p.id()));
        }
    }

    proptest! {
        /// Space-indented input parses, and traversal reproduces every
        /// non-filtered line in order.
        #[test]
        fn traversal_reproduces_line_order(lines in proptest::collection::vec("[ ]{0,4}[a-z]{0,6}", 0..40)) {
            let text = lines.join("\n");
            let tree = ConfigTree::parse(&text, &ParseOptions::default()).expect("space-only input");

            let expected: Vec<usize> = text
                .lines()
                .enumerate()
                .map(|(i, _)| i + 1)
                .collect();
            let got: Vec<usize> = tree.iter().map(|n| n.line_number()).collect();
            prop_assert_eq!(got, expected);

            for node in tree.iter() {
                if let Some(parent) = node.parent() {
                    prop_assert!(node.indent() > parent.indent());
                }
            }
        }
    }
}
