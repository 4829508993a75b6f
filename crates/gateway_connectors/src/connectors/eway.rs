pub mod transformers;

use std::sync::LazyLock;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
    types::{AmountConvertor, StringMinorUnit, StringMinorUnitForConnector, ToMinorUnit},
};
use error_stack::{report, ResultExt};
use gateway_domain_models::{
    payment_method_data::Card,
    router_data::{ConnectorAuthType, RouterData},
    router_flow_types::{Execute, Purchase},
    router_request_types::{PaymentsPurchaseData, PurchaseOptions, RefundsData},
    router_response_types::PaymentsResponseData,
    types::{PaymentsPurchaseRouterData, RefundsRouterData},
};
use gateway_env::{instrument, logger};
use gateway_interfaces::{
    api::{
        self, BoxedConnectorIntegration, ConnectorCommon, ConnectorCommonExt,
        ConnectorIntegration, ConnectorIntegrationAny, ConnectorTranscript, ConnectorTransport,
    },
    configs::{Connectors, Settings},
    errors,
    types::{self, Response},
};
use regex::Regex;
use transformers as eway;

use crate::{
    constants::{self, headers},
    types::ResponseRouterData,
    utils,
};

#[derive(Clone)]
pub struct Eway {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMinorUnit> + Sync),
}

impl Eway {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMinorUnitForConnector,
        }
    }

    /// Amount as eWAY expects it: minor units, digits only
    pub fn format_amount(
        &self,
        amount: impl ToMinorUnit,
    ) -> CustomResult<StringMinorUnit, errors::ConnectorError> {
        utils::convert_amount(self.amount_converter, utils::to_minor_unit(amount)?)
    }
}

impl api::Payment for Eway {}
impl api::PaymentPurchase for Eway {}
impl api::Refund for Eway {}
impl api::RefundExecute for Eway {}

impl<Flow, Request, Response> ConnectorCommonExt<Flow, Request, Response> for Eway
where
    Self: ConnectorIntegration<Flow, Request, Response>,
{
    fn build_headers(
        &self,
        req: &RouterData<Flow, Request, Response>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        let mut header = vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )];
        let mut auth_header = self.get_auth_header(&req.connector_auth_type)?;
        header.append(&mut auth_header);
        Ok(header)
    }
}

impl ConnectorCommon for Eway {
    fn id(&self) -> &'static str {
        "eway"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/xml"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.eway.base_url.as_str()
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        // Credentials travel inside the XML body, never as headers
        eway::EwayAuthType::try_from(auth_type)
            .change_context(errors::ConnectorError::FailedToObtainAuthType)?;
        Ok(Vec::new())
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

impl ConnectorIntegration<Purchase, PaymentsPurchaseData, PaymentsResponseData> for Eway {
    fn get_headers(
        &self,
        req: &PaymentsPurchaseRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    fn get_url(
        &self,
        req: &PaymentsPurchaseRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let path = match (req.is_test_mode(), req.request.card.card_cvc.is_some()) {
            (true, true) => eway::eway_constants::TEST_CVN_PURCHASE,
            (true, false) => eway::eway_constants::TEST_PURCHASE,
            (false, true) => eway::eway_constants::LIVE_CVN_PURCHASE,
            (false, false) => eway::eway_constants::LIVE_PURCHASE,
        };
        Ok(endpoint(self.base_url(connectors), path))
    }

    fn get_request_body(
        &self,
        req: &PaymentsPurchaseRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let amount = utils::convert_amount(self.amount_converter, req.request.amount)?;

        let connector_router_data = eway::EwayRouterData::from((amount, req));
        let connector_req = eway::EwayPaymentsRequest::try_from(&connector_router_data)?;
        RequestContent::xml(&connector_req).change_context(errors::ConnectorError::RequestEncodingFailed)
    }

    fn build_request(
        &self,
        req: &PaymentsPurchaseRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::PaymentsPurchaseType::get_url(self, req, connectors)?)
                .headers(types::PaymentsPurchaseType::get_headers(
                    self, req, connectors,
                )?)
                .set_body(types::PaymentsPurchaseType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &PaymentsPurchaseRouterData,
        res: Response,
    ) -> CustomResult<PaymentsPurchaseRouterData, errors::ConnectorError> {
        let response = eway::EwayPaymentsResponse::parse(&res.response)?;
        logger::info!(connector_response=?response);
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}

impl ConnectorIntegration<Execute, RefundsData, PaymentsResponseData> for Eway {
    fn get_headers(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    fn get_url(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        let path = if req.is_test_mode() {
            eway::eway_constants::TEST_REFUND
        } else {
            eway::eway_constants::LIVE_REFUND
        };
        Ok(endpoint(self.base_url(connectors), path))
    }

    fn get_request_body(
        &self,
        req: &RefundsRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let refund_amount = utils::convert_amount(self.amount_converter, req.request.refund_amount)?;

        let connector_router_data = eway::EwayRouterData::from((refund_amount, req));
        let connector_req = eway::EwayRefundRequest::try_from(&connector_router_data)?;
        RequestContent::xml(&connector_req).change_context(errors::ConnectorError::RequestEncodingFailed)
    }

    fn build_request(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::RefundExecuteType::get_url(self, req, connectors)?)
                .headers(types::RefundExecuteType::get_headers(
                    self, req, connectors,
                )?)
                .set_body(types::RefundExecuteType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &RefundsRouterData,
        res: Response,
    ) -> CustomResult<RefundsRouterData, errors::ConnectorError> {
        let response = eway::EwayPaymentsResponse::parse(&res.response)?;
        logger::info!(connector_response=?response);
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
        })
    }
}

#[deny(clippy::invalid_regex)]
static SENSITIVE_FIELDS: LazyLock<Option<[Regex; 2]>> = LazyLock::new(|| {
    let card_number = Regex::new(r"(?P<open><ewayCardNumber>)[^<]+(?P<close></ewayCardNumber>)");
    let cvn = Regex::new(r"(?P<open><ewayCVN>)[^<]+(?P<close></ewayCVN>)");
    match (card_number, cvn) {
        (Ok(card_number), Ok(cvn)) => Some([card_number, cvn]),
        (Err(error), _) | (_, Err(error)) => {
            logger::error!(?error, "invalid transcript scrubbing pattern");
            None
        }
    }
});

impl ConnectorTranscript for Eway {
    fn scrub(&self, transcript: &str) -> String {
        let Some(patterns) = SENSITIVE_FIELDS.as_ref() else {
            // Never hand back card data unscrubbed
            return constants::FILTERED.to_string();
        };
        let replacement = format!("${{open}}{}${{close}}", constants::FILTERED);
        patterns
            .iter()
            .fold(transcript.to_string(), |scrubbed, pattern| {
                pattern
                    .replace_all(&scrubbed, replacement.as_str())
                    .into_owned()
            })
    }
}

/// Caller facing eWAY gateway.
///
/// Offers a single-step `purchase` and a `refund` of an earlier purchase. eWAY's XML API has no
/// separate authorization phase, so there is deliberately no way to authorize or capture:
///
/// ```compile_fail
/// fn authorize<T: gateway_interfaces::api::ConnectorTransport>(
///     gateway: &gateway_connectors::EwayGateway<T>,
/// ) {
///     let _ = gateway.authorize();
/// }
/// ```
///
/// ```compile_fail
/// fn capture<T: gateway_interfaces::api::ConnectorTransport>(
///     gateway: &gateway_connectors::EwayGateway<T>,
/// ) {
///     let _ = gateway.capture();
/// }
/// ```
pub struct EwayGateway<T> {
    connector: &'static Eway,
    auth_type: ConnectorAuthType,
    connectors: Connectors,
    test_mode: bool,
    transport: T,
}

impl<T> std::fmt::Debug for EwayGateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EwayGateway")
            .field("auth_type", &self.auth_type)
            .field("connectors", &self.connectors)
            .field("test_mode", &self.test_mode)
            .finish_non_exhaustive()
    }
}

impl<T: ConnectorTransport> EwayGateway<T> {
    /// `auth_type` carries the eWAY customer id as `api_key` and, for refunds, the refund
    /// password as `key1`.
    pub fn new(
        auth_type: ConnectorAuthType,
        connectors: Connectors,
        test_mode: bool,
        transport: T,
    ) -> CustomResult<Self, errors::ConnectorError> {
        eway::EwayAuthType::try_from(&auth_type)?;
        Ok(Self {
            connector: Eway::new(),
            auth_type,
            connectors,
            test_mode,
            transport,
        })
    }

    /// Gateway using the configured endpoints. Every environment except production runs in test mode.
    pub fn from_settings(
        settings: &Settings,
        auth_type: ConnectorAuthType,
        transport: T,
    ) -> CustomResult<Self, errors::ConnectorError> {
        Self::new(
            auth_type,
            settings.connectors.clone(),
            gateway_env::which().is_test_mode(),
            transport,
        )
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Charge `card` with `amount` minor units in a single step.
    ///
    /// Fails before anything is sent when the amount is not an integer or the options carry
    /// no billing address. A decline is an `Ok` response with `success == false`.
    #[instrument(skip_all, fields(connector = "eway", flow = "purchase"))]
    pub fn purchase(
        &self,
        amount: impl ToMinorUnit,
        card: Card,
        options: PurchaseOptions,
    ) -> CustomResult<PaymentsResponseData, errors::ConnectorError> {
        let amount = utils::to_minor_unit(amount)?;
        let router_data: PaymentsPurchaseRouterData = RouterData::new(
            self.connector.id(),
            self.auth_type.clone(),
            self.test_mode,
            PaymentsPurchaseData::new(amount, card, options),
        );
        let connector_integration: BoxedConnectorIntegration<
            '_,
            Purchase,
            PaymentsPurchaseData,
            PaymentsResponseData,
        > = self.connector.get_connector_integration();

        self.execute(connector_integration, &router_data)
    }

    /// Refund `amount` minor units of the purchase identified by `authorization`.
    ///
    /// Whether the amount is refundable is decided by eWAY alone.
    #[instrument(skip_all, fields(connector = "eway", flow = "refund"))]
    pub fn refund(
        &self,
        amount: impl ToMinorUnit,
        authorization: &str,
    ) -> CustomResult<PaymentsResponseData, errors::ConnectorError> {
        let refund_amount = utils::to_minor_unit(amount)?;
        let router_data: RefundsRouterData = RouterData::new(
            self.connector.id(),
            self.auth_type.clone(),
            self.test_mode,
            RefundsData {
                refund_amount,
                connector_transaction_id: authorization.to_string(),
            },
        );
        let connector_integration: BoxedConnectorIntegration<
            '_,
            Execute,
            RefundsData,
            PaymentsResponseData,
        > = self.connector.get_connector_integration();

        self.execute(connector_integration, &router_data)
    }

    /// Amount formatted the way eWAY expects it, e.g. `1034` becomes `"1034"`
    pub fn amount(
        &self,
        value: impl ToMinorUnit,
    ) -> CustomResult<StringMinorUnit, errors::ConnectorError> {
        self.connector.format_amount(value)
    }

    pub fn supports_scrubbing(&self) -> bool {
        self.connector.supports_scrubbing()
    }

    /// Copy of a request/response transcript with card numbers and CVNs replaced by `[FILTERED]`
    pub fn scrub(&self, transcript: &str) -> String {
        self.connector.scrub(transcript)
    }

    fn execute<F, Req>(
        &self,
        connector_integration: BoxedConnectorIntegration<'_, F, Req, PaymentsResponseData>,
        router_data: &RouterData<F, Req, PaymentsResponseData>,
    ) -> CustomResult<PaymentsResponseData, errors::ConnectorError>
    where
        F: Clone + std::fmt::Debug + 'static,
        Req: Clone + std::fmt::Debug + 'static,
    {
        let data = api::execute_connector_processing_step(
            &self.transport,
            connector_integration,
            router_data,
            &self.connectors,
        )?;
        let response = data.response.ok_or_else(|| {
            report!(errors::ConnectorError::ResponseDeserializationFailed)
                .attach_printable("eWAY reply produced no response")
        })?;
        logger::info!(
            success = response.success,
            authorization = ?response.authorization,
            message = %response.message,
            test = response.test,
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use cards::{CardExpirationMonth, CardExpirationYear, CardNumber, CardSecurityCode};
    use common_utils::types::MinorUnit;
    use gateway_interfaces::configs::ConnectorParams;
    use masking::Secret;

    use super::*;

    fn connectors() -> Connectors {
        Connectors {
            eway: ConnectorParams {
                base_url: "https://www.eway.com.au/".to_string(),
            },
        }
    }

    fn purchase_data(test_mode: bool, cvc: Option<&str>) -> PaymentsPurchaseRouterData {
        RouterData::new(
            "eway",
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("87654321".to_string()),
            },
            test_mode,
            PaymentsPurchaseData {
                amount: MinorUnit::new(100),
                card: Card {
                    card_number: CardNumber::from_str("4444333322221111").unwrap(),
                    card_exp_month: CardExpirationMonth::try_from(9).unwrap(),
                    card_exp_year: CardExpirationYear::try_from(2030).unwrap(),
                    card_cvc: cvc.map(|cvc| CardSecurityCode::try_from(cvc).unwrap()),
                    card_holder_first_name: None,
                    card_holder_last_name: None,
                },
                order_id: None,
                email: None,
                billing_address: None,
                description: None,
            },
        )
    }

    fn refund_data(test_mode: bool) -> RefundsRouterData {
        RouterData::new(
            "eway",
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("87654321".to_string()),
            },
            test_mode,
            RefundsData {
                refund_amount: MinorUnit::new(40),
                connector_transaction_id: "11292".to_string(),
            },
        )
    }

    #[test]
    fn purchase_endpoint_depends_on_mode_and_cvn() {
        let connector = Eway::new();
        let url = |test_mode, cvc| {
            types::PaymentsPurchaseType::get_url(connector, &purchase_data(test_mode, cvc), &connectors())
                .unwrap()
        };

        assert_eq!(
            url(false, Some("123")),
            "https://www.eway.com.au/gateway_cvn/xmlpayment.asp"
        );
        assert_eq!(url(false, None), "https://www.eway.com.au/gateway/xmlpayment.asp");
        assert_eq!(
            url(true, Some("123")),
            "https://www.eway.com.au/gateway_cvn/xmltest/testpage.asp"
        );
        assert_eq!(
            url(true, None),
            "https://www.eway.com.au/gateway/xmltest/testpage.asp"
        );
    }

    #[test]
    fn refund_endpoint_depends_on_mode() {
        let connector = Eway::new();

        assert_eq!(
            types::RefundExecuteType::get_url(connector, &refund_data(false), &connectors())
                .unwrap(),
            "https://www.eway.com.au/gateway/xmlpaymentrefund.asp"
        );
        assert_eq!(
            types::RefundExecuteType::get_url(connector, &refund_data(true), &connectors())
                .unwrap(),
            "https://www.eway.com.au/gateway/xmltest/refund_test.asp"
        );
    }

    #[test]
    fn requests_are_xml_posts() {
        let connector = Eway::new();
        let mut data = refund_data(true);
        data.connector_auth_type = ConnectorAuthType::BodyKey {
            api_key: Secret::new("87654321".to_string()),
            key1: Secret::new("refund-pass".to_string()),
        };

        let request = types::RefundExecuteType::build_request(connector, &data, &connectors())
            .unwrap()
            .unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.headers.len(), 1);
        let body = request.body.unwrap();
        assert_eq!(body.content_type(), "application/xml");
        let xml = masking::ExposeInterface::expose(body.get_inner_value());
        assert!(xml.starts_with("<ewaygateway><ewayCustomerID>87654321</ewayCustomerID>"));
        assert!(xml.contains("<ewayTotalAmount>40</ewayTotalAmount>"));
        assert!(xml.contains("<ewayOriginalTrxnNumber>11292</ewayOriginalTrxnNumber>"));
        assert!(xml.contains("<ewayRefundPassword>refund-pass</ewayRefundPassword>"));
    }

    #[test]
    fn scrubbing_leaves_empty_and_self_closing_fields_alone() {
        let connector = Eway::new();
        let transcript = "<ewayCardNumber/><ewayCVN></ewayCVN><ewayCardExpiryMonth>09</ewayCardExpiryMonth>";

        assert!(connector.supports_scrubbing());
        assert_eq!(connector.scrub(transcript), transcript);
    }

    #[test]
    fn scrubbing_replaces_every_occurrence_and_is_idempotent() {
        let connector = Eway::new();
        let transcript = "<ewayCardNumber>4444333322221111</ewayCardNumber><ewayCVN>123</ewayCVN>\n<- \"<ewayCardNumber>4444333322221111</ewayCardNumber>\"";
        let expected = "<ewayCardNumber>[FILTERED]</ewayCardNumber><ewayCVN>[FILTERED]</ewayCVN>\n<- \"<ewayCardNumber>[FILTERED]</ewayCardNumber>\"";

        let scrubbed = connector.scrub(transcript);
        assert_eq!(scrubbed, expected);
        assert_eq!(connector.scrub(&scrubbed), expected);
    }

    #[test]
    fn amounts_are_plain_digit_strings() {
        let connector = Eway::new();

        assert_eq!(connector.format_amount(1034).unwrap().as_str(), "1034");
        assert_eq!(connector.format_amount(0_u32).unwrap().as_str(), "0");
        assert!(connector
            .format_amount("10.34")
            .unwrap_err()
            .current_context()
            .is_invalid_argument());
        assert!(connector.format_amount(-1).is_err());
    }
}
