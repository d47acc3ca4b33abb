//! Compressed link table

use std::mem;

/// Compressed sparse row representation of the raw links, keyed by node index
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    /// Number of nodes in the table
    pub node_count: usize,

    /// Offset array: offsets[i] to offsets[i+1] defines the link range for node i
    pub offsets: Vec<u32>,

    /// Concatenated lists of target node indices
    pub targets: Vec<u32>,
}

impl LinkTable {
    /// Build a table from per-node adjacency lists
    pub fn from_adjacency(mut adjacency_lists: Vec<Vec<u32>>) -> Self {
        let node_count = adjacency_lists.len();
        let link_count: usize = adjacency_lists.iter().map(|list| list.len()).sum();

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut offset = 0;
        for list in &adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut targets = Vec::with_capacity(link_count);
        for list in &mut adjacency_lists {
            list.sort_unstable();
            targets.extend_from_slice(list);
        }

        Self {
            node_count,
            offsets,
            targets,
        }
    }

    /// Targets of links leaving `node`
    pub fn outgoing(&self, node: usize) -> &[u32] {
        if node + 1 >= self.offsets.len() {
            return &[];
        }
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.targets[start..end]
    }

    /// Check if there's a link from src to dst
    pub fn has_link(&self, src: usize, dst: u32) -> bool {
        self.outgoing(src).binary_search(&dst).is_ok()
    }

    /// Every link as a (source index, target index) pair, in source order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count)
            .flat_map(move |src| self.outgoing(src).iter().map(move |&dst| (src, dst as usize)))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Self>()
            + self.offsets.capacity() * mem::size_of::<u32>()
            + self.targets.capacity() * mem::size_of::<u32>()
    }
}
