use crate::client::GymClient;
use crate::endpoints::Route;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::session::TokenStore;
use crate::transport::Transport;
use crate::types::{AdCampaign, NewAdCampaign};

impl<T: Transport, S: TokenStore> GymClient<T, S> {
    pub fn list_ad_campaigns(&self) -> Result<Vec<AdCampaign>, ApiError> {
        self.get(Route::AdCampaigns)
    }

    pub fn create_ad_campaign(&self, campaign: &NewAdCampaign) -> Result<AdCampaign, ApiError> {
        self.send_json(HttpMethod::Post, Route::CreateAdCampaign, campaign)
    }

    pub fn get_ad_campaign_by_id(&self, campaign_id: &str) -> Result<AdCampaign, ApiError> {
        self.get(Route::AdCampaign(campaign_id))
    }
}
