use crate::models::NftHolding;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const UNNAMED_NFT: &str = "Unnamed NFT";

#[derive(Debug, Clone, PartialEq)]
pub struct NftCard {
    pub key: String,
    pub name: String,
    pub symbol: String,
    pub image: String,
    pub chain: String,
    pub possible_spam: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NftGallery {
    pub cards: Vec<NftCard>,
    /// Spam-flagged items left out when hiding is on
    pub hidden_spam: usize,
}

impl NftGallery {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.hidden_spam == 0
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn nft_card(nft: &NftHolding) -> NftCard {
    NftCard {
        key: nft.key(),
        name: non_blank(&nft.name).unwrap_or(UNNAMED_NFT).to_string(),
        symbol: non_blank(&nft.symbol).unwrap_or_default().to_string(),
        image: non_blank(&nft.token_uri).unwrap_or(PLACEHOLDER_IMAGE).to_string(),
        chain: nft.chain.clone(),
        possible_spam: nft.possible_spam,
    }
}

pub fn nft_gallery(nfts: &[NftHolding], hide_spam: bool) -> NftGallery {
    let mut gallery = NftGallery::default();
    for nft in nfts {
        if hide_spam && nft.possible_spam {
            gallery.hidden_spam += 1;
            continue;
        }
        gallery.cards.push(nft_card(nft));
    }
    gallery
}
