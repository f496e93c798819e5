use std::fmt;

use crate::skiplist::SkipList;

/// Draws one row per non-empty layer, top layer first. `*` marks the head and
/// every node keeps the column of its position on layer 0:
///
/// ```text
/// *--------------------   8------------
/// *----   1------------   8------------
/// *----   1----   3----   8----   9----
/// ```
impl<T: fmt::Display> fmt::Display for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let height = self.nodes().map(|node| node.num_layers()).max().unwrap_or(0);
        for layer in (0..height).rev() {
            write!(f, "*----")?;
            for node in self.nodes() {
                if node.num_layers() > layer {
                    write!(f, "{:>4}----", node.item())?;
                } else {
                    write!(f, "--------")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
