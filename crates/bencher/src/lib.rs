//! Fixtures shared by the benches: raw request files and how to slice them.

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn normal(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Normal, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    /// The request split into consecutive fragments of at most `size` bytes,
    /// the way a socket could hand them out.
    pub fn fragments(&self, size: usize) -> impl Iterator<Item = &'static [u8]> {
        self.file.bytes().chunks(size)
    }
}

/// A complete request, CRLF line endings included.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.content.as_bytes()
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
}

impl TestGroup {
    /// Fragment sizes worth measuring for requests of this group.
    pub fn fragment_sizes(self) -> &'static [usize] {
        match self {
            TestGroup::Small => &[1, 16],
            TestGroup::Normal => &[16, 256],
        }
    }
}
