use sha1::{Digest, Sha1};

/// names a temporary reference by hashing a sequence number with the payload
pub fn reference_id(seq: u64, data: &[u8]) -> String {
    let mut hash = Sha1::new();
    hash.update(seq.to_be_bytes());
    hash.update(data);
    let digest = hash.finalize();

    hex::encode(digest)
}
